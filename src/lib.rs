//! Claon admin server library.
//!
//! Sign-up and review workflows for climbing centers and lectors, the center admin's
//! posts and reviews views, file uploads, and the HTTP layer exposing them.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
