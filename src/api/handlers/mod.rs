//! API handlers for Taskejo.
//!
//! This module organizes the service's route handlers: authentication
//! (sign-up/sign-in and token verification), owner-scoped task CRUD, and
//! service health.

pub mod auth;
pub mod health;
pub mod root;
pub mod tasks;
