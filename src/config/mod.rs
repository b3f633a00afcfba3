//! Configuration modules for the Coachdesk API.
//!
//! Each submodule loads one aspect of configuration from environment
//! variables:
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT secret and token lifetime

pub mod cors;
pub mod database;
pub mod jwt;
