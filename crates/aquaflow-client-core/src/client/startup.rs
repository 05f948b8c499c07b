use anyhow::Context as _;
use aquaflow_shared::{
    const_config::path::PATH_AUTH_CHECK_TOKEN,
    session::{Route, Session},
    uac::{CheckTokenResponse, Role},
};
use futures::channel::oneshot;
use tracing::{debug, info, warn};

use super::{
    extract_response, handle_error, send_and_notify, StartupState, StartupWaiter, UiCallBack,
};
use crate::Client;

impl Client {
    /// Decides where the app starts: login, customer home or driver home
    ///
    /// A stored session is checked with the backend first. Any failure along
    /// the way is treated as an invalid session: the stored session is removed
    /// and the route is [`Route::Login`]. Never fails.
    ///
    /// The decision is only made once per client. Calls made while the check
    /// is in flight wait for its result and later calls get the same route
    /// back without any storage or network access.
    #[tracing::instrument(skip(ui_notify))]
    pub fn resolve_startup_route<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<Route> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock().expect("mutex poisoned");
        match std::mem::take(&mut inner.startup) {
            StartupState::Done(route) => {
                inner.startup = StartupState::Done(route);
                drop(inner);
                send_and_notify(tx, route, ui_notify);
                return rx;
            }
            StartupState::InProgress(mut waiters) => {
                debug!("startup check already in flight");
                waiters.push(StartupWaiter {
                    tx,
                    ui_notify: Box::new(ui_notify),
                });
                inner.startup = StartupState::InProgress(waiters);
                return rx;
            }
            StartupState::NotStarted => inner.startup = StartupState::InProgress(Vec::new()),
        }
        drop(inner);

        let stored = match self.session_store.load() {
            Ok(stored) => stored,
            Err(err) => {
                warn!(?err, "unable to read stored session");
                self.discard_stored_session();
                None
            }
        };
        let Some(session) = stored else {
            let route = self.finish_startup(Route::Login);
            send_and_notify(tx, route, ui_notify);
            return rx;
        };

        let args = serde_json::json!({ "token": session.auth_token().expose_secret() });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let route = match process_check_token(resp).await {
                Ok(role) => {
                    client.activate_verified_session(session, role);
                    Route::from(role)
                }
                Err(err) => {
                    warn!(?err, "stored session rejected");
                    if client.startup_route().is_none() {
                        client.discard_stored_session();
                    }
                    Route::Login
                }
            };
            let route = client.finish_startup(route);
            send_and_notify(tx, route, ui_notify);
        };
        self.initiate_request(PATH_AUTH_CHECK_TOKEN, &args, on_done);
        rx
    }

    /// Records the startup route and hands it to everyone who was waiting for
    /// it. If a route was already recorded that one is kept.
    fn finish_startup(&self, route: Route) -> Route {
        let waiters = {
            let mut inner = self.inner.lock().expect("mutex poisoned");
            match std::mem::replace(&mut inner.startup, StartupState::Done(route)) {
                StartupState::InProgress(waiters) => waiters,
                StartupState::NotStarted => Vec::new(),
                StartupState::Done(first) => {
                    inner.startup = StartupState::Done(first);
                    return first;
                }
            }
        };
        info!(%route, waiting = waiters.len(), "startup route resolved");
        for StartupWaiter { tx, ui_notify } in waiters {
            send_and_notify(tx, route, ui_notify);
        }
        route
    }

    /// The role from the backend is authoritative, storage is only updated if
    /// it differs
    fn activate_verified_session(&self, session: Session, role: Role) {
        let session = if session.role == role {
            session
        } else {
            let session = session.with_role(role);
            if let Err(err) = self.session_store.save(&session) {
                warn!(?err, "failed to update role of stored session");
            }
            session
        };
        self.set_session(session);
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_check_token(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<Role> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response).await);
    }
    let check_token_response: CheckTokenResponse = response
        .json()
        .await
        .context("failed to parse result as json")?;
    Ok(Role::try_from(check_token_response.user.user_type)?)
}
