pub mod context;
pub mod handshake;
pub mod plan;
pub mod report;
pub mod seeder;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::Session;
pub use crate::domain::ports::{ConfigProvider, SeedApi};
pub use crate::utils::error::Result;
