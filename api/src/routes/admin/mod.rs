//! Administrative route handlers

pub mod revoke_sessions;
