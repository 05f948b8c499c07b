//! This module stores the expected format of the arguments for the requests
//! along with the checks done locally before anything is sent

use crate::{const_config::validation::VALIDATION_PASSWORD_MIN_LENGTH, errors::ValidationError};
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
}

#[derive(Clone)]
pub struct SignupReqArgs {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub house_number: String,
    pub portion: Portion,
    pub area: String,
}

#[derive(Debug, Clone)]
pub struct PasswordResetReqArgs {
    pub email: String,
}

/// Which part of the house the delivery goes to
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Portion {
    #[default]
    Upper,
    Lower,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_email_format(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

fn check_password_length(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().chars().count() < VALIDATION_PASSWORD_MIN_LENGTH {
        Err(ValidationError::PasswordTooShort {
            min: VALIDATION_PASSWORD_MIN_LENGTH,
        })
    } else {
        Ok(())
    }
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.email) || is_blank(self.password.expose_secret()) {
            return Err(ValidationError::MissingCredentials);
        }
        check_email_format(&self.email)?;
        check_password_length(&self.password)
    }
}

impl SignupReqArgs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.full_name)
            || is_blank(&self.email)
            || is_blank(self.password.expose_secret())
            || is_blank(self.confirm_password.expose_secret())
            || is_blank(&self.house_number)
            || is_blank(&self.area)
        {
            return Err(ValidationError::MissingFields);
        }
        check_email_format(&self.email)?;
        check_password_length(&self.password)?;
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(ValidationError::PasswordsDoNotMatch);
        }
        Ok(())
    }
}

impl PasswordResetReqArgs {
    pub fn new<S: Into<String>>(email: S) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.email) {
            return Err(ValidationError::MissingEmail);
        }
        check_email_format(&self.email)
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

impl Debug for SignupReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupReqArgs")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field(
                "has_confirm_password",
                &!self.confirm_password.expose_secret().is_empty(),
            )
            .field("house_number", &self.house_number)
            .field("portion", &self.portion)
            .field("area", &self.area)
            .finish()
    }
}
