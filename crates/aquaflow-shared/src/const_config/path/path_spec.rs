use reqwest::{self, Method};

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: reqwest::Method,
}

impl PathSpec {
    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    /// Joins the path onto `base_url` tolerating a trailing slash on the base
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}
