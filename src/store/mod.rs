//! Persistent machine-wide settings store.
//!
//! The agent's tunables live in the host configuration store: the registry
//! under `HKEY_LOCAL_MACHINE` on Windows, a file tree under a machine-wide
//! directory everywhere else. Both backends speak the same minimal contract
//! and classify their native failures identically, so the applier and the
//! tests never care which one is underneath.

use std::io;

use thiserror::Error;

pub mod file;
#[cfg(target_os = "windows")]
pub mod registry;

pub use file::FileStore;
#[cfg(target_os = "windows")]
pub use registry::RegistryStore;

/// Failure classes for store access.
///
/// Every backend folds its native errors into these three cases. In
/// particular, every "does not exist" condition (missing namespace or
/// missing value) becomes `NotFound`, which the read path displays as
/// "Not set" instead of treating it as a fault.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Machine-wide writes require elevation on the host.
    #[error("access denied for {path}; administrative rights are required")]
    PermissionDenied { path: String },

    /// The namespace or value does not exist.
    #[error("{path} is not present in the store")]
    NotFound { path: String },

    /// Any other store fault: I/O error, corrupt value, unusable namespace.
    #[error("store access failed for {path}: {source}")]
    Backend {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Classify a backend I/O error against the common taxonomy.
    pub(crate) fn from_io(path: impl Into<String>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied { path },
            io::ErrorKind::NotFound => StoreError::NotFound { path },
            _ => StoreError::Backend { path, source: err },
        }
    }
}

/// Minimal capability the applier needs from the host configuration store.
///
/// `write_u32` create-or-opens the namespace (including any missing parent
/// segments) and overwrites the named value as a fixed-width unsigned
/// integer. `read_u32` opens the namespace and reads the value back. Any
/// handle a backend acquires is scoped to the single call and released on
/// every exit path.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore {
    fn write_u32(&self, namespace: &str, name: &str, value: u32) -> Result<(), StoreError>;

    fn read_u32(&self, namespace: &str, name: &str) -> Result<u32, StoreError>;
}

/// Store backing the current platform: the registry on Windows, the
/// file-tree store everywhere else.
#[cfg(target_os = "windows")]
pub fn default_store() -> RegistryStore {
    RegistryStore::local_machine()
}

/// Store backing the current platform: the registry on Windows, the
/// file-tree store everywhere else.
#[cfg(not(target_os = "windows"))]
pub fn default_store() -> FileStore {
    FileStore::at_default_root()
}
