//! Services layer: the registration workflow and its external backend seam.

pub mod backend;
pub mod error;
pub mod metrics;
mod registration;

pub use backend::{BackendClient, BackendError, SupabaseClient};
pub use error::ServiceError;
pub use registration::RegistrationService;
