//! The persisted proof of authentication and the routes it leads to

use secrecy::{ExposeSecret as _, SecretString};

use crate::uac::{DisplayName, LoginResponse, Role, UnknownRole, UserId};

/// Opaque token issued by the backend. Never printed by `Debug`.
#[derive(Debug, Clone)]
pub struct AuthToken(SecretString);

/// Stored under [`CLIENT_SESSION_STORAGE_KEY`] using the same field names the
/// backend uses in the login response
///
/// [`CLIENT_SESSION_STORAGE_KEY`]: crate::const_config::client::CLIENT_SESSION_STORAGE_KEY
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct Session {
    #[serde(rename = "token")]
    auth_token: AuthToken,
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub role: Role,
    #[serde(rename = "name", default)]
    pub display_name: DisplayName,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "avatar", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Where the user lands, either at startup or after logging in
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Route {
    #[strum(serialize = "login")]
    Login,
    #[strum(serialize = "customer-home")]
    CustomerHome,
    #[strum(serialize = "driver-home")]
    DriverHome,
}

impl AuthToken {
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<SecretString> for AuthToken {
    fn from(value: SecretString) -> Self {
        Self(value)
    }
}

impl serde::Serialize for AuthToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.expose_secret())
    }
}

impl<'de> serde::Deserialize<'de> for AuthToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <String as serde::Deserialize>::deserialize(deserializer).map(Into::into)
    }
}

impl Session {
    pub fn new(
        auth_token: AuthToken,
        user_id: UserId,
        role: Role,
        display_name: DisplayName,
        email: String,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            auth_token,
            user_id,
            role,
            display_name,
            email,
            avatar_url,
        }
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    /// The home the role of this session leads to
    pub fn home_route(&self) -> Route {
        self.role.into()
    }

    /// Replaces the role, used when the backend reports a different role during
    /// token verification than the one stored
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl TryFrom<LoginResponse> for Session {
    type Error = UnknownRole;

    fn try_from(value: LoginResponse) -> Result<Self, Self::Error> {
        let role = Role::try_from(value.role)?;
        Ok(Self {
            auth_token: value.token.into(),
            user_id: value.id,
            role,
            display_name: value.name,
            email: value.email,
            avatar_url: value.avatar,
        })
    }
}

impl From<Role> for Route {
    fn from(value: Role) -> Self {
        match value {
            Role::Customer => Route::CustomerHome,
            Role::Driver => Route::DriverHome,
        }
    }
}
