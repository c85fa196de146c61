//! Database module
//!
//! Connection pool management and MySQL repository implementations.

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;
