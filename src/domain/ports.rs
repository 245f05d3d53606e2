use crate::domain::model::{
    Account, InstitutionRef, InstitutionSeed, JobRequest, PendingRequest, PostRequest,
    ProfileUpdate, RegisterRequest, Session, Specialty,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The REST API being seeded.
///
/// Every call maps 200/201 to `Ok`, 409 to `SeedError::AlreadyExists` and
/// anything else to `SeedError::UnexpectedStatus`.
#[async_trait]
pub trait SeedApi: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<Session>;
    async fn login(&self, account: &Account) -> Result<Session>;

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<()>;
    async fn list_specialties(&self, token: &str) -> Result<Vec<Specialty>>;
    async fn add_specialty(&self, token: &str, specialty_id: &str, is_primary: bool) -> Result<()>;

    /// Returns the new institution's id when the backend reports one.
    async fn create_institution(
        &self,
        token: &str,
        institution: &InstitutionSeed,
    ) -> Result<Option<String>>;
    async fn list_institutions(&self, token: &str) -> Result<Vec<InstitutionRef>>;

    async fn create_job(&self, token: &str, job: &JobRequest) -> Result<()>;

    async fn send_connection_request(&self, token: &str, receiver_id: &str) -> Result<()>;
    async fn pending_requests(&self, token: &str) -> Result<Vec<PendingRequest>>;
    async fn accept_connection(&self, token: &str, request_id: &str) -> Result<()>;

    /// Returns the new post's id when the backend reports one.
    async fn create_post(&self, token: &str, post: &PostRequest) -> Result<Option<String>>;
    async fn like_post(&self, token: &str, post_id: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn demo_email(&self) -> Option<&str>;
    fn demo_password(&self) -> Option<&str>;
    fn request_timeout(&self) -> Option<Duration>;
    fn like_posts(&self) -> bool;
}
