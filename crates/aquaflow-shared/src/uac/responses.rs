use secrecy::SecretString;

use super::{DisplayName, UserId};

/// Body returned by a successful login
#[derive(Debug, serde::Deserialize)]
pub struct LoginResponse {
    pub token: SecretString,
    pub id: UserId,
    /// Kept as text so an unrecognized role is reported as such instead of as
    /// a parse failure
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub name: DisplayName,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct SignupResponse {
    /// Confirmation message, only present on success
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct CheckTokenResponse {
    pub user: CheckTokenUser,
}

#[derive(Debug, serde::Deserialize)]
pub struct CheckTokenUser {
    #[serde(rename = "userType")]
    pub user_type: String,
}

/// Shape the backend uses for failures. Either field may carry the message.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `error` takes priority over `message`, empty strings are ignored
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|x| !x.is_empty())
            .or(self.message.filter(|x| !x.is_empty()))
    }
}
