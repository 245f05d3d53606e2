//! In-memory stand-in for the backend, used by the unit tests.

use crate::domain::model::{
    Account, InstitutionRef, InstitutionSeed, JobRequest, PendingRequest, PostRequest,
    ProfileUpdate, RegisterRequest, Session, Specialty,
};
use crate::domain::ports::SeedApi;
use crate::utils::error::{Result, SeedError};
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct StoredRequest {
    id: String,
    sender_id: String,
    receiver_id: String,
    status: String,
}

#[derive(Default)]
struct FakeState {
    next_id: usize,
    accounts: HashMap<String, (String, String)>,
    profile_updates: usize,
    doctor_specialties: HashSet<(String, String)>,
    institutions: Vec<InstitutionRef>,
    jobs: Vec<JobRequest>,
    requests: Vec<StoredRequest>,
    connections: HashSet<(String, String)>,
    posts: Vec<(String, String)>,
    likes: HashSet<(String, String)>,
    /// Forced status per operation name.
    failing: HashMap<String, u16>,
    hide_pending: bool,
}

impl FakeState {
    fn next(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn check(&self, operation: &str) -> Result<()> {
        match self.failing.get(operation) {
            Some(409) => Err(SeedError::already_exists("Conflict")),
            Some(status) => Err(SeedError::unexpected_status(*status, "Internal server error")),
            None => Ok(()),
        }
    }

    fn doctor_for(&self, token: &str) -> Result<String> {
        token
            .strip_prefix("tok-")
            .filter(|id| self.accounts.values().any(|(_, doctor_id)| doctor_id.as_str() == *id))
            .map(str::to_string)
            .ok_or_else(|| SeedError::unexpected_status(401, "Unauthorized"))
    }
}

fn pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn session(doctor_id: &str) -> Session {
    Session {
        access_token: format!("tok-{}", doctor_id),
        doctor_id: doctor_id.to_string(),
    }
}

pub struct FakeApi {
    specialties: Vec<Specialty>,
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        let specialties = [("spec-card", "Cardiologia"), ("spec-neuro", "Neurologia")]
            .into_iter()
            .map(|(id, name)| Specialty {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();

        Self {
            specialties,
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Makes every call to `operation` answer 500.
    pub async fn fail_on(&self, operation: &str) {
        self.state.lock().await.failing.insert(operation.to_string(), 500);
    }

    /// Makes every call to `operation` answer 409.
    pub async fn conflict_on(&self, operation: &str) {
        self.state.lock().await.failing.insert(operation.to_string(), 409);
    }

    pub async fn hide_pending_requests(&self) {
        self.state.lock().await.hide_pending = true;
    }

    /// Registers an account directly, as if it had been created before the run.
    pub async fn preexisting_account(&self, email: &str, password: &str) -> String {
        let mut state = self.state.lock().await;
        let doctor_id = state.next("doc");
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), doctor_id.clone()));
        doctor_id
    }

    pub async fn request_sender(&self, request_id: &str) -> Option<String> {
        let state = self.state.lock().await;
        state
            .requests
            .iter()
            .find(|r| r.id == request_id)
            .map(|r| r.sender_id.clone())
    }

    pub async fn are_connected(&self, a: &str, b: &str) -> bool {
        self.state.lock().await.connections.contains(&pair(a, b))
    }

    pub async fn account_count(&self) -> usize {
        self.state.lock().await.accounts.len()
    }

    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    pub async fn institution_count(&self) -> usize {
        self.state.lock().await.institutions.len()
    }

    pub async fn job_count(&self) -> usize {
        self.state.lock().await.jobs.len()
    }

    pub async fn jobs(&self) -> Vec<JobRequest> {
        self.state.lock().await.jobs.clone()
    }

    pub async fn post_count(&self) -> usize {
        self.state.lock().await.posts.len()
    }

    pub async fn like_count(&self) -> usize {
        self.state.lock().await.likes.len()
    }

    pub async fn profile_update_count(&self) -> usize {
        self.state.lock().await.profile_updates
    }
}

#[async_trait::async_trait]
impl SeedApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> Result<Session> {
        let mut state = self.state.lock().await;
        state.check("register")?;
        if state.accounts.contains_key(&request.email) {
            return Err(SeedError::already_exists("Email already registered"));
        }
        let doctor_id = state.next("doc");
        state.accounts.insert(
            request.email.clone(),
            (request.password.clone(), doctor_id.clone()),
        );
        Ok(session(&doctor_id))
    }

    async fn login(&self, account: &Account) -> Result<Session> {
        let state = self.state.lock().await;
        state.check("login")?;
        match state.accounts.get(&account.email) {
            Some((password, doctor_id)) if *password == account.password => Ok(session(doctor_id)),
            _ => Err(SeedError::unexpected_status(401, "Invalid credentials")),
        }
    }

    async fn update_profile(&self, token: &str, _update: &ProfileUpdate) -> Result<()> {
        let mut state = self.state.lock().await;
        state.check("update_profile")?;
        state.doctor_for(token)?;
        state.profile_updates += 1;
        Ok(())
    }

    async fn list_specialties(&self, token: &str) -> Result<Vec<Specialty>> {
        let state = self.state.lock().await;
        state.check("list_specialties")?;
        state.doctor_for(token)?;
        Ok(self.specialties.clone())
    }

    async fn add_specialty(&self, token: &str, specialty_id: &str, _is_primary: bool) -> Result<()> {
        let mut state = self.state.lock().await;
        state.check("add_specialty")?;
        let doctor_id = state.doctor_for(token)?;
        if !state
            .doctor_specialties
            .insert((doctor_id, specialty_id.to_string()))
        {
            return Err(SeedError::already_exists("Specialty already added"));
        }
        Ok(())
    }

    async fn create_institution(
        &self,
        token: &str,
        institution: &InstitutionSeed,
    ) -> Result<Option<String>> {
        let mut state = self.state.lock().await;
        state.check("create_institution")?;
        state.doctor_for(token)?;
        if state.institutions.iter().any(|i| i.name == institution.name) {
            return Err(SeedError::already_exists("Institution already exists"));
        }
        let id = state.next("inst");
        state.institutions.push(InstitutionRef {
            id: id.clone(),
            name: institution.name.clone(),
        });
        Ok(Some(id))
    }

    async fn list_institutions(&self, token: &str) -> Result<Vec<InstitutionRef>> {
        let state = self.state.lock().await;
        state.check("list_institutions")?;
        state.doctor_for(token)?;
        Ok(state.institutions.clone())
    }

    async fn create_job(&self, token: &str, job: &JobRequest) -> Result<()> {
        let mut state = self.state.lock().await;
        state.check("create_job")?;
        state.doctor_for(token)?;
        state.jobs.push(job.clone());
        Ok(())
    }

    async fn send_connection_request(&self, token: &str, receiver_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.check("send_connection_request")?;
        let sender_id = state.doctor_for(token)?;
        if sender_id == receiver_id {
            return Err(SeedError::unexpected_status(400, "Cannot connect to yourself"));
        }
        if state.connections.contains(&pair(&sender_id, receiver_id)) {
            return Err(SeedError::already_exists("Already connected"));
        }
        let pending_exists = state.requests.iter().any(|r| {
            r.status == PendingRequest::PENDING
                && pair(&r.sender_id, &r.receiver_id) == pair(&sender_id, receiver_id)
        });
        if pending_exists {
            return Err(SeedError::already_exists("Connection request already pending"));
        }
        let id = state.next("req");
        state.requests.push(StoredRequest {
            id,
            sender_id,
            receiver_id: receiver_id.to_string(),
            status: PendingRequest::PENDING.to_string(),
        });
        Ok(())
    }

    async fn pending_requests(&self, token: &str) -> Result<Vec<PendingRequest>> {
        let state = self.state.lock().await;
        state.check("pending_requests")?;
        let me = state.doctor_for(token)?;
        if state.hide_pending {
            return Ok(Vec::new());
        }
        Ok(state
            .requests
            .iter()
            .filter(|r| r.receiver_id == me && r.status == PendingRequest::PENDING)
            .map(|r| PendingRequest {
                id: r.id.clone(),
                sender_id: r.sender_id.clone(),
                status: r.status.clone(),
            })
            .collect())
    }

    async fn accept_connection(&self, token: &str, request_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.check("accept_connection")?;
        let me = state.doctor_for(token)?;
        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == request_id && r.receiver_id == me)
            .ok_or_else(|| SeedError::unexpected_status(404, "Request not found"))?;
        if request.status != PendingRequest::PENDING {
            return Err(SeedError::unexpected_status(400, "Request is no longer pending"));
        }
        request.status = "ACCEPTED".to_string();
        let edge = pair(&request.sender_id, &request.receiver_id);
        state.connections.insert(edge);
        Ok(())
    }

    async fn create_post(&self, token: &str, _post: &PostRequest) -> Result<Option<String>> {
        let mut state = self.state.lock().await;
        state.check("create_post")?;
        let author = state.doctor_for(token)?;
        let id = state.next("post");
        state.posts.push((author, id.clone()));
        Ok(Some(id))
    }

    async fn like_post(&self, token: &str, post_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.check("like_post")?;
        let me = state.doctor_for(token)?;
        if !state.likes.insert((post_id.to_string(), me)) {
            return Err(SeedError::already_exists("Already liked"));
        }
        Ok(())
    }
}
