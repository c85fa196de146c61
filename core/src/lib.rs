//! # CharterHub Core
//!
//! Core business logic and domain layer for the CharterHub backend.
//! This crate contains the token service, the authentication flows built on it,
//! repository interfaces, and the error types shared by every outer layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{TokenRepository, UserRepository};
pub use services::{AuthService, Clock, SystemClock, TokenService};
