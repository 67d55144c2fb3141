//! Session state: the bearer token and the key-value store it lives in.

use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Formatter},
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

/// A place to persist small string values, keyed by name.
///
/// Implementations must be usable from several in-flight requests at once.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Errors that may be returned by a [`Storage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unable to access \"{}\"", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("\"{}\" doesn't contain a valid session file", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A [`Storage`] that forgets everything when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self { MemoryStorage::default() }

    fn items(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.items().remove(key);
        Ok(())
    }
}

/// A [`Storage`] backed by a JSON object on disk, so values survive a
/// restart.
///
/// A missing file is treated as an empty store.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStorage {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new())
            },
            Err(e) => return Err(self.io_error(e)),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        serde_json::from_slice(&raw).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(
        &self,
        items: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let raw = serde_json::to_vec_pretty(items).map_err(|e| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source: e,
            }
        })?;

        fs::write(&self.path, raw).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut items = self.load()?;

        if items.remove(key).is_some() {
            self.save(&items)?;
        }

        Ok(())
    }
}

/// An opaque bearer token issued by the backend at login.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new<S: Into<String>>(token: S) -> Self { Token(token.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

/// The user's session, shared by every request made through an
/// [`crate::ApiClient`].
///
/// The token is `Absent` until [`Session::set_token()`] is called, and goes
/// back to `Absent` after [`Session::clear()`].
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
    key: String,
}

impl Session {
    /// Create a session which keeps its token under [`crate::TOKEN_KEY`].
    pub fn new<S>(storage: S) -> Self
    where
        S: Storage + 'static,
    {
        Session::from_shared(Arc::new(storage))
    }

    pub fn from_shared(storage: Arc<dyn Storage>) -> Self {
        Session {
            storage,
            key: String::from(crate::TOKEN_KEY),
        }
    }

    /// A session that only lives as long as the process.
    pub fn in_memory() -> Self { Session::new(MemoryStorage::new()) }

    pub fn storage(&self) -> &Arc<dyn Storage> { &self.storage }

    pub fn token(&self) -> Result<Option<Token>, StorageError> {
        let token = self.storage.get(&self.key)?;
        Ok(token.filter(|t| !t.is_empty()).map(Token))
    }

    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        self.token().map(|t| t.is_some())
    }

    pub fn set_token(&self, token: &Token) -> Result<(), StorageError> {
        self.storage.set(&self.key, token.as_str())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("key", &self.key).finish()
    }
}
