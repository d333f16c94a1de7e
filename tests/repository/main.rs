//! Repository test suite.
//!
//! Exercises the SeaORM repositories directly against in-memory SQLite.
//!
//! Run with: cargo test --test repository

#[path = "../common/mod.rs"]
mod test_helpers;

mod test_reviews;
mod test_users;
