use std::fmt::Display;

use super::UnknownRole;

/// Decides which experience a user is routed to after authentication
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Customer,
    Driver,
}

impl Role {
    /// The form the backend uses on the wire
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Driver => "driver",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = UnknownRole;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" | "customer" => Ok(Self::Customer),
            "driver" => Ok(Self::Driver),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().try_into()
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
