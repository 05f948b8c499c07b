//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Key the session record is persisted under
    pub const CLIENT_SESSION_STORAGE_KEY: &str = "userData";
    pub const CLIENT_DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
}

pub mod validation {
    pub const VALIDATION_PASSWORD_MIN_LENGTH: usize = 6;
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_AUTH_CHECK_TOKEN: PathSpec = PathSpec::post("/auth/check-token");
    pub const PATH_AUTH_FORGET_PASSWORD: PathSpec = PathSpec::post("/auth/forget-password");
    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/auth/login");
    pub const PATH_AUTH_SIGNUP: PathSpec = PathSpec::post("/auth/signup");
}
