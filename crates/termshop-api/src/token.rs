//! Durable storage for the session credential.
//!
//! The backend issues a single opaque bearer token at login. It is persisted
//! to a plain file so a session survives process restarts, and cached in
//! memory so attaching it to a request never touches the filesystem.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle to the stored credential.
///
/// Cloning is cheap; all clones observe the same token. Only the session
/// layer mutates the store (login saves, logout and a failed restore clear);
/// the API client is a read-only consumer.
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    cached: Mutex<Option<String>>,
}

impl TokenStore {
    /// Opens the store at `path`, loading any previously saved token.
    ///
    /// A missing or unreadable file simply means no stored session.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = read_token_file(&path);
        Self {
            inner: Arc::new(Inner {
                path,
                cached: Mutex::new(cached),
            }),
        }
    }

    /// The current token, if a session is stored.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        lock(&self.inner.cached).clone()
    }

    /// Persists `token` to disk and updates the in-memory copy.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the token file cannot be written.
    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.inner.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.inner.path, token)?;
        *lock(&self.inner.cached) = Some(token.to_owned());
        Ok(())
    }

    /// Removes the stored token from disk and memory.
    ///
    /// Never fails: the in-memory copy is always cleared, and a file that
    /// cannot be removed is logged and left behind.
    pub fn clear(&self) {
        *lock(&self.inner.cached) = None;
        if let Err(err) = fs::remove_file(&self.inner.path) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.inner.path.display(),
                    error = %err,
                    "failed to remove token file"
                );
            }
        }
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("path", &self.inner.path)
            .field("token", &self.current().map(|_| "<redacted>"))
            .finish()
    }
}

fn read_token_file(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
