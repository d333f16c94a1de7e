//! SeaORM entity definitions for PostgreSQL database.

pub mod center;
pub mod center_approved_file;
pub mod center_fee;
pub mod center_hold;
pub mod center_wall;
pub mod climbing_history;
pub mod embedded;
pub mod lector;
pub mod lector_approved_file;
pub mod post;
pub mod review;
pub mod review_answer;
pub mod review_tag;
pub mod user;
