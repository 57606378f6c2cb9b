pub mod auth;
pub mod client;
pub mod error;
pub mod graph;
pub mod state;
pub mod types;

pub use client::{IdentityClient, IdentityOptions};
pub use error::{IdentityError, IdentityResult};
pub use types::*;
