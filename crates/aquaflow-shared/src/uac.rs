//! Shared items related to user identity and roles

mod errors;
mod responses;
mod role;
mod user;

pub use errors::UnknownRole;
pub use responses::{CheckTokenResponse, CheckTokenUser, ErrorBody, LoginResponse, SignupResponse};
pub use role::Role;
pub use user::{DisplayName, UserId};
