//! Business logic services.

pub mod admin;
pub mod center;
pub mod jwt;
pub mod oauth;
pub mod storage;
pub mod tasks;
pub mod user;

pub use admin::AdminService;
pub use center::{CenterService, ReviewFilter};
pub use jwt::{JwtManager, TokenPair};
pub use oauth::{OAuthUserInfoProvider, OAuthUserInfoProviderSupplier};
pub use storage::{FileStorage, Storage};
pub use tasks::{BackgroundTask, SignUpKind, TaskQueue};
pub use user::UserService;
