use aquaflow_client_core::{Client, MemorySessionStore, SessionStore};
use aquaflow_shared::{
    req_args::LoginReqArgs,
    session::{AuthToken, Session},
    telemetry::{create_trace_file, get_subscriber, init_subscriber},
    uac::{Role, UserId},
};
use serde_json::json;
use std::{
    ops::Deref,
    sync::{Arc, LazyLock},
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let (file, path) =
            create_trace_file(&std::env::temp_dir(), "client_core_tests").unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

pub const TEST_EMAIL: &str = "user@test.com";
pub const TEST_PASSWORD: &str = "12345678";

pub struct TestApp {
    pub mock_server: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub core_client: Client,
}

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_store(MemorySessionStore::default()).await
}

pub async fn spawn_app_with_session(role: Role) -> TestApp {
    spawn_app_with_store(MemorySessionStore::with_session(stored_session(role))).await
}

async fn spawn_app_with_store(store: MemorySessionStore) -> TestApp {
    start_tracing();
    let mock_server = MockServer::start().await;
    let store = Arc::new(store);
    let core_client = Client::new(
        mock_server.uri(),
        Arc::clone(&store) as Arc<dyn SessionStore>,
    );
    TestApp {
        mock_server,
        store,
        core_client,
    }
}

fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}

pub fn stored_session(role: Role) -> Session {
    Session::new(
        AuthToken::from("stored-token".to_string()),
        UserId::Number(7),
        role,
        "Stored".into(),
        TEST_EMAIL.to_string(),
        None,
    )
}

pub fn login_args() -> LoginReqArgs {
    LoginReqArgs::new(TEST_EMAIL, TEST_PASSWORD.to_string().into())
}

pub fn login_success_body(role: &str) -> serde_json::Value {
    json!({
        "token": "abc",
        "role": role,
        "id": 1,
        "name": "Test",
        "email": TEST_EMAIL
    })
}

impl TestApp {
    /// Mounts a response for `endpoint` that must be hit exactly `times`
    pub async fn mock_post(&self, endpoint: &str, response: ResponseTemplate, times: u64) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(response)
            .expect(times)
            .mount(&self.mock_server)
            .await;
    }

    pub fn stored(&self) -> Option<Session> {
        self.store.load().unwrap()
    }

    pub async fn received_count(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .map(|x| x.len())
            .unwrap_or_default()
    }
}
