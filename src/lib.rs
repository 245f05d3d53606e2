pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpSeedApi;
pub use config::dataset::SeedData;
pub use self::core::{context::SeedContext, plan::SeedPlan, report::SeedReport, seeder::Seeder};
pub use utils::error::{Result, SeedError};
