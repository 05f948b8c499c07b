use anyhow::Context as _;
use aquaflow_shared::{const_config::client::CLIENT_SESSION_STORAGE_KEY, session::Session};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

use super::SessionStore;

/// Stores the session as JSON in a single file named after
/// [`CLIENT_SESSION_STORAGE_KEY`] inside the chosen directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// The directory is only created when a session is first saved
    pub fn new<T: AsRef<Path>>(directory: T) -> Self {
        Self {
            path: directory
                .as_ref()
                .join(format!("{CLIENT_SESSION_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    #[tracing::instrument(ret, err(Debug))]
    fn load(&self) -> anyhow::Result<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {:?}", self.path));
            }
        };
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("stored session in {:?} is corrupt", self.path))?;
        Ok(Some(session))
    }

    #[tracing::instrument(err(Debug))]
    fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(directory) = self.path.parent() {
            fs::create_dir_all(directory)
                .with_context(|| format!("failed to create directory {directory:?}"))?;
        }
        let contents = serde_json::to_string(session).context("failed to serialize session")?;

        // Write then rename so a crash never leaves half a session behind
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("failed to write {tmp_path:?}"))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to move session into {:?}", self.path))?;
        debug!(path = ?self.path, "session saved");
        Ok(())
    }

    #[tracing::instrument(err(Debug))]
    fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {:?}", self.path)),
        }
    }
}
