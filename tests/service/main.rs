//! Service-level test suite.
//!
//! Drives the services against an in-memory SQLite database with fake storage and OAuth
//! providers. No external services are needed.
//!
//! Run with: cargo test --test service

#[path = "../common/mod.rs"]
mod test_helpers;

mod test_admin;
mod test_center;
mod test_http;
mod test_sign_in;
mod test_sign_up;
