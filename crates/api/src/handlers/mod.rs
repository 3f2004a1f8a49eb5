//! HTTP handlers, one module per resource.

pub mod activities;
pub mod attendance;
pub mod auth;
pub mod students;
