pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

pub use config::Config;
pub use error::ServiceError;
pub use routes::{router, AppState};
