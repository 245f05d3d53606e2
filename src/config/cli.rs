use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "medconnect-seed")]
#[command(about = "Populate a MedConnect backend with sample doctors, institutions, jobs, connections and posts")]
pub struct CliConfig {
    /// Base URL of the REST API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// TOML dataset to seed instead of the built-in one
    #[arg(long)]
    pub data: Option<String>,

    /// Override the demo account's email from the dataset
    #[arg(long)]
    pub demo_email: Option<String>,

    /// Override the demo account's password from the dataset
    #[arg(long)]
    pub demo_password: Option<String>,

    /// Per-request timeout in seconds (client default when omitted)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Have connected doctors like each created post
    #[arg(long)]
    pub like_posts: bool,

    /// Validate and print the plan without calling the API
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Log CPU and memory after each step")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data: None,
            demo_email: None,
            demo_password: None,
            timeout_secs: None,
            like_posts: false,
            dry_run: false,
            monitor: false,
            log_json: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn demo_email(&self) -> Option<&str> {
        self.demo_email.as_deref()
    }

    fn demo_password(&self) -> Option<&str> {
        self.demo_password.as_deref()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn like_posts(&self) -> bool {
        self.like_posts
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;

        if let Some(path) = &self.data {
            validation::validate_path("data", path)?;
        }
        if let Some(email) = &self.demo_email {
            validation::validate_non_empty_string("demo_email", email)?;
        }
        if let Some(timeout) = self.timeout_secs {
            validation::validate_positive_number("timeout_secs", timeout, 1)?;
        }

        Ok(())
    }
}
