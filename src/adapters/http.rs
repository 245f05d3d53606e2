use crate::domain::model::{
    Account, AddSpecialtyRequest, AuthResponse, CreatedEntity, CreatedPost, InstitutionRef,
    InstitutionSeed, JobRequest, PendingRequest, PostRequest, ProfileUpdate, RegisterRequest,
    Session, Specialty,
};
use crate::domain::ports::{ConfigProvider, SeedApi};
use crate::utils::error::{Result, SeedError};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Maps a response status to the seeder's outcome.
///
/// 200 and 201 succeed, 409 means the record is already there, anything else fails.
pub fn classify_status(status: u16, body: &str) -> Result<()> {
    match status {
        200 | 201 => Ok(()),
        409 => Err(SeedError::already_exists(body)),
        other => Err(SeedError::unexpected_status(other, body)),
    }
}

/// `GET /institutions` answers either with a bare list or with `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InstitutionListing {
    Paged { data: Vec<serde_json::Value> },
    Plain(Vec<serde_json::Value>),
}

impl InstitutionListing {
    fn into_refs(self) -> Vec<InstitutionRef> {
        let items = match self {
            InstitutionListing::Paged { data } => data,
            InstitutionListing::Plain(items) => items,
        };
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()
    }
}

/// `SeedApi` over HTTP with a single reused reqwest client.
#[derive(Debug, Clone)]
pub struct HttpSeedApi {
    client: Client,
    base_url: String,
}

impl HttpSeedApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the body of a successful response.
    async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("API response status: {}", status);
        classify_status(status, &body)?;
        Ok(body)
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn authenticate(&self, request: RequestBuilder) -> Result<Session> {
        let auth: AuthResponse = self.execute_json(request).await?;

        let access_token = auth
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SeedError::missing_field("accessToken"))?;
        let doctor_id = auth
            .user
            .and_then(|u| u.doctor_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SeedError::missing_field("user.doctorId"))?;

        Ok(Session {
            access_token,
            doctor_id,
        })
    }
}

#[async_trait::async_trait]
impl SeedApi for HttpSeedApi {
    async fn register(&self, request: &RegisterRequest) -> Result<Session> {
        self.authenticate(self.request(Method::POST, "/auth/register", None).json(request))
            .await
    }

    async fn login(&self, account: &Account) -> Result<Session> {
        self.authenticate(self.request(Method::POST, "/auth/login", None).json(account))
            .await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<()> {
        self.execute(self.request(Method::PUT, "/doctors/me", Some(token)).json(update))
            .await?;
        Ok(())
    }

    async fn list_specialties(&self, token: &str) -> Result<Vec<Specialty>> {
        self.execute_json(self.request(Method::GET, "/doctors/ref/specialties", Some(token)))
            .await
    }

    async fn add_specialty(&self, token: &str, specialty_id: &str, is_primary: bool) -> Result<()> {
        let body = AddSpecialtyRequest {
            specialty_id: specialty_id.to_string(),
            is_primary,
        };
        self.execute(
            self.request(Method::POST, "/doctors/me/specialties", Some(token))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn create_institution(
        &self,
        token: &str,
        institution: &InstitutionSeed,
    ) -> Result<Option<String>> {
        let body = self
            .execute(
                self.request(Method::POST, "/institutions", Some(token))
                    .json(institution),
            )
            .await?;

        Ok(serde_json::from_str::<CreatedEntity>(&body)
            .ok()
            .and_then(|created| created.id))
    }

    async fn list_institutions(&self, token: &str) -> Result<Vec<InstitutionRef>> {
        let listing: InstitutionListing = self
            .execute_json(self.request(Method::GET, "/institutions", Some(token)))
            .await?;
        Ok(listing.into_refs())
    }

    async fn create_job(&self, token: &str, job: &JobRequest) -> Result<()> {
        self.execute(self.request(Method::POST, "/jobs", Some(token)).json(job))
            .await?;
        Ok(())
    }

    async fn send_connection_request(&self, token: &str, receiver_id: &str) -> Result<()> {
        let path = format!("/connections/request/{}", receiver_id);
        self.execute(self.request(Method::POST, &path, Some(token)))
            .await?;
        Ok(())
    }

    async fn pending_requests(&self, token: &str) -> Result<Vec<PendingRequest>> {
        self.execute_json(self.request(Method::GET, "/connections/pending", Some(token)))
            .await
    }

    async fn accept_connection(&self, token: &str, request_id: &str) -> Result<()> {
        let path = format!("/connections/accept/{}", request_id);
        self.execute(self.request(Method::POST, &path, Some(token)))
            .await?;
        Ok(())
    }

    async fn create_post(&self, token: &str, post: &PostRequest) -> Result<Option<String>> {
        let body = self
            .execute(self.request(Method::POST, "/feed/posts", Some(token)).json(post))
            .await?;

        Ok(serde_json::from_str::<CreatedPost>(&body)
            .ok()
            .and_then(CreatedPost::into_id))
    }

    async fn like_post(&self, token: &str, post_id: &str) -> Result<()> {
        let path = format!("/feed/posts/{}/like", post_id);
        self.execute(self.request(Method::POST, &path, Some(token)))
            .await?;
        Ok(())
    }
}
