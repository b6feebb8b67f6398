pub mod activities;
pub mod error;
pub mod models;

pub use error::PipelineError;
pub use models::PersonaProfile;
