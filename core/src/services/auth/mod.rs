//! Authentication service module
//!
//! This module provides the account-level flows built on the token service:
//! - Email and password login
//! - Logout of one session or of every session
//! - Password change with forced invalidation of older tokens
//! - Admin-initiated session revocation

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, CurrentUser, LoginOutcome};
