use std::fmt::Display;

/// Backends differ on whether ids are numbers or strings so both are kept as
/// received
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct DisplayName(String);

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DisplayName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DisplayName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{id}"),
            UserId::Text(id) => write!(f, "{id}"),
        }
    }
}

impl Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
