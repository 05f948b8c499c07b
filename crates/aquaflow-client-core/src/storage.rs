//! Where the session survives between app starts

use aquaflow_shared::session::Session;
use std::{fmt::Debug, sync::Mutex};

mod file;

pub use file::FileSessionStore;

/// Holds at most one session. Clearing an empty store is not an error.
pub trait SessionStore: Debug + Send + Sync {
    fn load(&self) -> anyhow::Result<Option<Session>>;
    fn save(&self, session: &Session) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Keeps the session for the life of the process only
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> anyhow::Result<Option<Session>> {
        Ok(self.session.lock().expect("mutex poisoned").clone())
    }

    fn save(&self, session: &Session) -> anyhow::Result<()> {
        *self.session.lock().expect("mutex poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.session.lock().expect("mutex poisoned") = None;
        Ok(())
    }
}
