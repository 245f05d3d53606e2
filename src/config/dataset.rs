use crate::domain::model::{
    Account, ConnectionSeed, DoctorSeed, InstitutionSeed, JobSeed, PostSeed, SpecialtyAssignment,
};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_DATASET: &str = include_str!("../../data/medconnect.toml");

/// Everything the seeder inserts, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub demo: Option<Account>,
    #[serde(default)]
    pub existing_accounts: Vec<Account>,
    #[serde(default)]
    pub doctors: Vec<DoctorSeed>,
    #[serde(default)]
    pub specialties: Vec<SpecialtyAssignment>,
    #[serde(default)]
    pub institutions: Vec<InstitutionSeed>,
    #[serde(default)]
    pub jobs: Vec<JobSeed>,
    #[serde(default)]
    pub connections: Vec<ConnectionSeed>,
    #[serde(default)]
    pub posts: Vec<PostSeed>,
}

impl SeedData {
    /// The dataset compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_DATASET)
    }

    /// Loads a dataset from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Applies command line overrides to the demo account.
    pub fn override_demo(&mut self, email: Option<&str>, password: Option<&str>) {
        if email.is_none() && password.is_none() {
            return;
        }

        let demo = self.demo.get_or_insert_with(|| Account {
            email: String::new(),
            password: String::new(),
        });
        if let Some(email) = email {
            demo.email = email.to_string();
        }
        if let Some(password) = password {
            demo.password = password.to_string();
        }
    }

    /// Number of (doctor, specialty) assignments across all specialties.
    pub fn specialty_assignment_count(&self) -> usize {
        self.specialties.iter().map(|s| s.emails.len()).sum()
    }

    /// Emails connected to `email` by any pair in the connection list.
    pub fn connections_of<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.connections.iter().filter_map(move |pair| {
            if pair.sender == email {
                Some(pair.receiver.as_str())
            } else if pair.receiver == email {
                Some(pair.sender.as_str())
            } else {
                None
            }
        })
    }
}

impl Validate for SeedData {
    fn validate(&self) -> Result<()> {
        if let Some(demo) = &self.demo {
            validation::validate_non_empty_string("demo.email", &demo.email)?;
        }

        for doctor in &self.doctors {
            validation::validate_non_empty_string("doctors.email", &doctor.email)?;
            validation::validate_non_empty_string("doctors.password", &doctor.password)?;
        }
        validation::validate_unique("doctors.email", self.doctors.iter().map(|d| d.email.as_str()))?;

        for institution in &self.institutions {
            validation::validate_non_empty_string("institutions.name", &institution.name)?;
        }

        for job in &self.jobs {
            if let (Some(min), Some(max)) = (&job.salary_min, &job.salary_max) {
                validation::validate_ordered_range(
                    &format!("jobs[{}].salary", job.title),
                    min,
                    max,
                )?;
            }
        }

        for post in &self.posts {
            validation::validate_non_empty_string("posts.content", &post.content)?;
        }

        Ok(())
    }
}
