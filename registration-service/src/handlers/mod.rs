pub mod metrics;
pub mod registration;

pub use registration::register;
