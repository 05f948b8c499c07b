//! Runs one command against the client and produces the text to print

use anyhow::Context as _;
use aquaflow_client_core::{Client, PasswordResetFlow};
use aquaflow_shared::{
    errors::NotLoggedInError,
    req_args::{LoginReqArgs, PasswordResetReqArgs, SignupReqArgs},
};

use crate::cli::Command;

/// Empty function for use when a call back isn't needed
fn no_cb() {}

// Skipping all as the command may hold passwords
#[tracing::instrument(skip_all)]
pub async fn run(command: Command, client: &Client) -> anyhow::Result<String> {
    match command {
        Command::Startup => {
            let route = client
                .resolve_startup_route(no_cb)
                .await
                .context("startup check was dropped")?;
            Ok(route.to_string())
        }
        Command::Login { email, password } => {
            let session = client
                .login(LoginReqArgs::new(email, password.into()), no_cb)
                .await
                .context("login request was dropped")??;
            Ok(format!(
                "Welcome {}. Continue to {}",
                session.display_name,
                session.home_route()
            ))
        }
        Command::Signup {
            full_name,
            email,
            password,
            confirm_password,
            house_number,
            portion,
            area,
        } => {
            let args = SignupReqArgs {
                full_name,
                email,
                password: password.into(),
                confirm_password: confirm_password.into(),
                house_number,
                portion,
                area,
            };
            let msg = client
                .signup(args, no_cb)
                .await
                .context("signup request was dropped")??;
            Ok(format!("{msg}. Please log in"))
        }
        Command::ForgotPassword { email } => {
            let mut flow = PasswordResetFlow::new(client.clone(), PasswordResetReqArgs::new(email));
            flow.send().await?;
            Ok(format!(
                "We've sent password reset instructions to {}",
                flow.email()
            ))
        }
        Command::Logout => {
            client.logout()?;
            Ok("Logged out".to_string())
        }
        Command::Whoami => {
            // Uses the stored session as is, `startup` is the way to verify it
            let session = client.stored_session()?.ok_or(NotLoggedInError)?;
            Ok(format!(
                "{} <{}> ({}, id {})",
                session.display_name, session.email, session.role, session.user_id
            ))
        }
    }
}
