use anyhow::{anyhow, Context as _};
use aquaflow_shared::{
    const_config::path::{PATH_AUTH_FORGET_PASSWORD, PATH_AUTH_LOGIN, PATH_AUTH_SIGNUP},
    req_args::{LoginReqArgs, PasswordResetReqArgs, SignupReqArgs},
    session::Session,
    uac::{LoginResponse, SignupResponse},
};
use futures::channel::oneshot;
use secrecy::ExposeSecret as _;
use std::sync::Arc;
use tracing::info;

use super::{extract_response, handle_error, send_and_notify, UiCallBack};
use crate::Client;

impl Client {
    /// Validates locally then logs in. On success the session is persisted and
    /// becomes the current session. Use [`Session::home_route`] to decide
    /// where to go next.
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Arc<Session>>> {
        let (tx, rx) = oneshot::channel();
        if let Err(e) = args.validate() {
            send_and_notify(tx, Err(e.into()), ui_notify);
            return rx;
        }
        let args = serde_json::json!({
            "email": args.email,
            "password": args.password.expose_secret(),
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp, client).await;
            send_and_notify(tx, msg, ui_notify);
        };
        self.initiate_request(PATH_AUTH_LOGIN, &args, on_done);
        rx
    }

    /// Creates an account. Does not log in, on success the user is expected
    /// to go to the login screen. Returns the confirmation message from the
    /// server.
    #[tracing::instrument(skip(ui_notify))]
    pub fn signup<F: UiCallBack>(
        &self,
        args: SignupReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<String>> {
        let (tx, rx) = oneshot::channel();
        if let Err(e) = args.validate() {
            send_and_notify(tx, Err(e.into()), ui_notify);
            return rx;
        }
        let args = serde_json::json!({
            "fullName": args.full_name,
            "email": args.email,
            "password": args.password.expose_secret(),
            "confirmPassword": args.confirm_password.expose_secret(),
            "houseNumber": args.house_number,
            "portion": args.portion,
            "area": args.area,
        });
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_signup(resp).await;
            send_and_notify(tx, msg, ui_notify);
        };
        self.initiate_request(PATH_AUTH_SIGNUP, &args, on_done);
        rx
    }

    /// Asks the backend to email password reset instructions
    #[tracing::instrument(skip(ui_notify))]
    pub fn request_password_reset<F: UiCallBack>(
        &self,
        args: PasswordResetReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        if let Err(e) = args.validate() {
            let (tx, rx) = oneshot::channel();
            send_and_notify(tx, Err(e.into()), ui_notify);
            return rx;
        }
        self.send_password_reset(&args, ui_notify)
    }

    fn send_password_reset<F: UiCallBack>(
        &self,
        args: &PasswordResetReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let args = serde_json::json!({ "email": args.email });
        self.send_request_expect_empty(PATH_AUTH_FORGET_PASSWORD, &args, ui_notify)
    }

    /// Ends the session in memory and in storage. There is no server side
    /// session to end.
    #[tracing::instrument]
    pub fn logout(&self) -> anyhow::Result<()> {
        self.clear_session(); // Clear in memory even if storage fails
        self.session_store
            .clear()
            .context("failed to remove stored session")
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<Arc<Session>> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response).await);
    }
    let login_response: LoginResponse = response
        .json()
        .await
        .context("failed to parse result as json")?;
    let session = Session::try_from(login_response)?;
    client
        .session_store
        .save(&session)
        .context("failed to store session")?;
    info!(user_id = %session.user_id, role = %session.role, "logged in");
    Ok(client.set_session(session))
}

#[tracing::instrument(ret, err(Debug))]
async fn process_signup(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<String> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response).await);
    }
    let signup_response: SignupResponse = response
        .json()
        .await
        .context("failed to parse result as json")?;
    match signup_response.msg {
        Some(msg) => Ok(msg),
        None => Err(anyhow!(
            "{}",
            signup_response
                .message
                .unwrap_or_else(|| "Failed to create account".to_string())
        )),
    }
}

/// Drives the forgot password screen. Once the email is sent the user may ask
/// for it to be sent again.
#[derive(Debug)]
pub struct PasswordResetFlow {
    client: Client,
    args: PasswordResetReqArgs,
    email_sent: bool,
}

impl PasswordResetFlow {
    pub fn new(client: Client, args: PasswordResetReqArgs) -> Self {
        Self {
            client,
            args,
            email_sent: false,
        }
    }

    pub fn email(&self) -> &str {
        &self.args.email
    }

    pub fn is_email_sent(&self) -> bool {
        self.email_sent
    }

    /// Validates then sends. Marks the email as sent on success.
    #[tracing::instrument]
    pub async fn send(&mut self) -> anyhow::Result<()> {
        let rx = self.client.request_password_reset(self.args.clone(), || {});
        self.finish(rx).await
    }

    /// Sends the same request again for the email already accepted by
    /// [`Self::send`]
    #[tracing::instrument]
    pub async fn resend(&mut self) -> anyhow::Result<()> {
        self.email_sent = false;
        let rx = self.client.send_password_reset(&self.args, || {});
        self.finish(rx).await
    }

    async fn finish(&mut self, rx: oneshot::Receiver<anyhow::Result<()>>) -> anyhow::Result<()> {
        rx.await.context("password reset request was dropped")??;
        self.email_sent = true;
        Ok(())
    }
}
