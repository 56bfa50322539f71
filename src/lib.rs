//! # Swimdash
//!
//! The account dashboard backend for the swim school's guardian portal.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
