use crate::domain::model::{InstitutionRef, Session, Specialty};
use std::collections::HashMap;

/// Lookup tables accumulated during one run.
#[derive(Debug, Clone, Default)]
pub struct SeedContext {
    sessions: HashMap<String, Session>,
    /// Emails in the order their sessions were first obtained.
    session_order: Vec<String>,
    specialty_ids: HashMap<String, String>,
    institution_ids: HashMap<String, String>,
    created_posts: Vec<CreatedPostRef>,
}

/// A post created during this run.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPostRef {
    pub author_email: String,
    pub post_id: String,
}

impl SeedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_session(&mut self, email: &str, session: Session) {
        if self.sessions.insert(email.to_string(), session).is_none() {
            self.session_order.push(email.to_string());
        }
    }

    pub fn session(&self, email: &str) -> Option<&Session> {
        self.sessions.get(email)
    }

    pub fn token(&self, email: &str) -> Option<&str> {
        self.session(email).map(|s| s.access_token.as_str())
    }

    pub fn doctor_id(&self, email: &str) -> Option<&str> {
        self.session(email).map(|s| s.doctor_id.as_str())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Token of the earliest session obtained in this run.
    pub fn first_token(&self) -> Option<&str> {
        self.session_order
            .first()
            .and_then(|email| self.token(email))
    }

    /// Token used for administrative calls: the demo account's, else the first one available.
    pub fn admin_token(&self, demo_email: Option<&str>) -> Option<&str> {
        demo_email
            .and_then(|email| self.token(email))
            .or_else(|| self.first_token())
    }

    pub fn set_specialties(&mut self, specialties: Vec<Specialty>) {
        self.specialty_ids = specialties
            .into_iter()
            .map(|s| (s.name, s.id))
            .collect();
    }

    pub fn specialty_id(&self, name: &str) -> Option<&str> {
        self.specialty_ids.get(name).map(String::as_str)
    }

    pub fn specialty_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specialty_ids.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn add_institution(&mut self, name: &str, id: String) {
        self.institution_ids.insert(name.to_string(), id);
    }

    /// Merges a full listing from the API; listed ids win over ones recorded earlier.
    pub fn merge_institutions(&mut self, listing: Vec<InstitutionRef>) {
        for institution in listing {
            self.institution_ids.insert(institution.name, institution.id);
        }
    }

    pub fn institution_id(&self, name: &str) -> Option<&str> {
        self.institution_ids.get(name).map(String::as_str)
    }

    pub fn institution_count(&self) -> usize {
        self.institution_ids.len()
    }

    pub fn add_created_post(&mut self, author_email: &str, post_id: String) {
        self.created_posts.push(CreatedPostRef {
            author_email: author_email.to_string(),
            post_id,
        });
    }

    pub fn created_posts(&self) -> &[CreatedPostRef] {
        &self.created_posts
    }
}
