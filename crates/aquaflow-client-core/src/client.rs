use anyhow::{anyhow, Context};
use aquaflow_shared::{
    const_config::{client::CLIENT_DEFAULT_BACKEND_URL, path::PathSpec},
    session::{Route, Session},
    uac::ErrorBody,
};
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use reqwest::StatusCode;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::storage::{MemorySessionStore, SessionStore};

mod auth;
mod startup;

pub use auth::PasswordResetFlow;

/// Talks to the backend and owns the current session
///
/// Cheap to clone, all clones share the same session
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    session_store: Arc<dyn SessionStore>,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
    session: Option<Arc<Session>>,
    startup: StartupState,
}

/// Only one startup check runs at a time, callers arriving while it is in
/// flight wait for its result
#[derive(Debug, Default)]
enum StartupState {
    #[default]
    NotStarted,
    InProgress(Vec<StartupWaiter>),
    Done(Route),
}

struct StartupWaiter {
    tx: oneshot::Sender<Route>,
    ui_notify: Box<dyn FnOnce() + Send>,
}

impl Debug for StartupWaiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartupWaiter").finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(
            CLIENT_DEFAULT_BACKEND_URL.to_string(),
            Arc::new(MemorySessionStore::default()),
        )
    }
}

impl ClientInner {
    #[tracing::instrument]
    fn new(server_address: String) -> Self {
        Self {
            server_address,
            session: None,
            startup: StartupState::NotStarted,
        }
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            api_client: reqwest::Client::new(),
            session_store,
            inner: Arc::new(Mutex::new(ClientInner::new(server_address))),
        }
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, path_spec: PathSpec, args: &T, on_done: F)
    where
        T: serde::Serialize,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let url = self.path_to_url(&path_spec);
        let request = self.api_client.request(path_spec.method, url).json(args);
        reqwest_cross::fetch(request, on_done)
    }

    fn send_request_expect_empty<F, T>(
        &self,
        path_spec: PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_empty(resp).await;
            send_and_notify(tx, msg, ui_notify);
        };
        self.initiate_request(path_spec, args, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path_spec: &PathSpec) -> String {
        path_spec.url(
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address,
        )
    }

    pub fn session(&self) -> Option<Arc<Session>> {
        self.inner.lock().expect("mutex poisoned").session.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.lock().expect("mutex poisoned").session.is_some()
    }

    /// Reads the persisted session without verifying it
    pub fn stored_session(&self) -> anyhow::Result<Option<Session>> {
        self.session_store.load()
    }

    /// The route chosen at startup, `None` until it has been resolved
    pub fn startup_route(&self) -> Option<Route> {
        match self.inner.lock().expect("mutex poisoned").startup {
            StartupState::Done(route) => Some(route),
            StartupState::NotStarted | StartupState::InProgress(_) => None,
        }
    }

    fn set_session(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.inner.lock().expect("mutex poisoned").session = Some(Arc::clone(&session));
        session
    }

    fn clear_session(&self) {
        self.inner.lock().expect("mutex poisoned").session = None;
    }

    /// Removes the session both in memory and in storage. Storage failures are
    /// only logged as there is nothing the user can do about them.
    fn discard_stored_session(&self) {
        self.clear_session();
        if let Err(err) = self.session_store.clear() {
            warn!(?err, "failed to clear stored session");
        }
    }
}

/// Sends `msg` then runs the callback so the UI can pick it up
///
/// The receiver may already be gone if the user navigated away, requests are
/// not cancelled in that case so the result is just dropped
fn send_and_notify<T: Debug, F: UiCallBack>(tx: oneshot::Sender<T>, msg: T, ui_notify: F) {
    if let Err(msg) = tx.send(msg) {
        debug!(?msg, "receiver dropped before the result was ready");
    }
    ui_notify();
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

/// Prefers the message the server sent and falls back to the raw body or the
/// status code
#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let Ok(body) = response.text().await else {
        return anyhow!("failed to get response body");
    };
    error_from_body(status, &body)
}

fn error_from_body(status: StatusCode, body: &str) -> anyhow::Error {
    if body.trim().is_empty() {
        return anyhow!("request failed with status code: {status} and no body");
    }
    match serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
    {
        Some(msg) => anyhow!("{msg}"),
        None => anyhow!("{body}"),
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
