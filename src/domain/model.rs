use serde::{Deserialize, Serialize};

/// Login credentials of an account that already exists on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSeed {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub crm: String,
    pub crm_state: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<u16>,
    #[serde(default)]
    pub university_name: Option<String>,
}

impl DoctorSeed {
    pub fn account(&self) -> Account {
        Account {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn registration(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: self.full_name.clone(),
            crm: self.crm.clone(),
            crm_state: self.crm_state.clone(),
            phone: self.phone.clone().filter(|p| !p.is_empty()),
        }
    }

    /// Profile fields that carry a value. Empty strings and a zero year count as unset.
    pub fn profile_update(&self) -> ProfileUpdate {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        ProfileUpdate {
            city: non_empty(&self.city),
            state: non_empty(&self.state),
            bio: non_empty(&self.bio),
            graduation_year: self.graduation_year.filter(|y| *y > 0),
            university_name: non_empty(&self.university_name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyAssignment {
    pub specialty: String,
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionSeed {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub city: String,
    pub state: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeed {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub shift: String,
    pub city: String,
    pub state: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl JobSeed {
    /// Builds the request body; `specialty_id` is the resolved id of `self.specialty`.
    pub fn to_request(&self, specialty_id: Option<String>) -> JobRequest {
        JobRequest {
            title: self.title.clone(),
            kind: self.kind.clone(),
            shift: self.shift.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            description: self.description.clone(),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            requirements: self.requirements.clone().filter(|r| !r.is_empty()),
            specialty_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSeed {
    pub sender: String,
    pub receiver: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSeed {
    pub email: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostSeed {
    pub fn to_request(&self) -> PostRequest {
        PostRequest {
            content: self.content.clone(),
            post_type: PostRequest::ARTICLE.to_string(),
            tags: if self.tags.is_empty() {
                None
            } else {
                Some(self.tags.clone())
            },
        }
    }
}

// ---- request bodies ----

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub crm: String,
    pub crm_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSpecialtyRequest {
    pub specialty_id: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub shift: String,
    pub city: String,
    pub state: String,
    pub description: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub content: String,
    pub post_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PostRequest {
    pub const ARTICLE: &'static str = "ARTICLE";
}

// ---- responses ----

/// Access token and doctor id returned by register and login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub doctor_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: Option<String>,
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default)]
    pub doctor_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Specialty {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstitutionRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedEntity {
    pub id: Option<String>,
}

/// Feed responses name the id `postId`; some builds only send `id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPost {
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl CreatedPost {
    pub fn into_id(self) -> Option<String> {
        self.post_id.or(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    pub id: String,
    pub sender_id: String,
    pub status: String,
}

impl PendingRequest {
    pub const PENDING: &'static str = "PENDING";

    pub fn is_pending_from(&self, sender_id: &str) -> bool {
        self.sender_id == sender_id && self.status == Self::PENDING
    }
}
