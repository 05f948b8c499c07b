#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
#[error("Unrecognized user role: '{0}'")]
pub struct UnknownRole(pub String);
