//! Authentication and authorization.
//!
//! [`CurrentUser`] resolves the bearer token into a [`crate::models::RequestUser`];
//! [`policy`] decides what that subject may do.

mod extractor;
pub mod policy;

pub use extractor::CurrentUser;
pub use policy::{authorize, ensure_can_sign_up, ensure_owner};
