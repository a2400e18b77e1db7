//! File-tree settings store.
//!
//! Non-Windows hosts have no registry, so the agent keeps its machine-wide
//! settings as small files under a fixed root: one directory per namespace
//! segment, one file per value, holding the decimal integer. The layout
//! mirrors the registry shape closely enough that the fixed agent namespaces,
//! written in registry syntax, map over unchanged. Tests use this backend
//! against a temporary root on every platform.

use std::fs;
use std::io;
use std::path::PathBuf;

use super::{SettingsStore, StoreError};

/// Environment variable overriding the store root, for tests and
/// side-by-side installations.
pub const STORE_ROOT_ENV: &str = "PM_AGENT_STORE_ROOT";

/// Settings store keeping one file per value under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the machine-wide default for this platform.
    ///
    /// `PM_AGENT_STORE_ROOT` wins when set. Otherwise:
    /// - Linux: `/var/lib/pm-agent/store`
    /// - macOS: `/Library/Application Support/PMAgent/store`
    /// - anything else: the per-project data directory
    ///
    /// The machine-wide roots are intentionally not writable without
    /// elevation; an unelevated apply must fail rather than silently land
    /// in a per-user location the agent never reads.
    pub fn at_default_root() -> Self {
        Self::new(default_store_root())
    }

    /// Directory backing a namespace. Separators follow registry syntax so
    /// the fixed agent namespaces work verbatim.
    fn namespace_dir(&self, namespace: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in namespace.split('\\').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir
    }

    fn value_path(&self, namespace: &str, name: &str) -> PathBuf {
        self.namespace_dir(namespace).join(name)
    }
}

impl SettingsStore for FileStore {
    fn write_u32(&self, namespace: &str, name: &str, value: u32) -> Result<(), StoreError> {
        let dir = self.namespace_dir(namespace);
        fs::create_dir_all(&dir).map_err(|e| StoreError::from_io(namespace, e))?;

        let qualified = format!(r"{namespace}\{name}");
        fs::write(dir.join(name), format!("{value}\n"))
            .map_err(|e| StoreError::from_io(qualified, e))
    }

    fn read_u32(&self, namespace: &str, name: &str) -> Result<u32, StoreError> {
        let qualified = format!(r"{namespace}\{name}");
        let raw = fs::read_to_string(self.value_path(namespace, name))
            .map_err(|e| StoreError::from_io(qualified.clone(), e))?;

        // A present-but-unparseable value is a fault, not an absent value.
        raw.trim().parse::<u32>().map_err(|e| StoreError::Backend {
            path: qualified,
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }
}

fn default_store_root() -> PathBuf {
    if let Ok(root) = std::env::var(STORE_ROOT_ENV) {
        return PathBuf::from(root);
    }

    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/var/lib/pm-agent/store")
    }

    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support/PMAgent/store")
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        directories::ProjectDirs::from("dev", "pmtools", "pm-agent")
            .map(|d| d.data_dir().join("store"))
            .unwrap_or_else(|| PathBuf::from("pm-agent-store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_written_value_reads_back() {
        let (_dir, store) = temp_store();
        store.write_u32(r"Vendor\Agent", "Timeout", 200).unwrap();
        assert_eq!(store.read_u32(r"Vendor\Agent", "Timeout").unwrap(), 200);
    }

    #[test]
    fn test_write_overwrites_existing_value() {
        let (_dir, store) = temp_store();
        store.write_u32(r"Vendor\Agent", "Cpu", 15).unwrap();
        store.write_u32(r"Vendor\Agent", "Cpu", 30).unwrap();
        assert_eq!(store.read_u32(r"Vendor\Agent", "Cpu").unwrap(), 30);
    }

    #[test]
    fn test_write_creates_missing_parent_segments() {
        let (dir, store) = temp_store();
        store
            .write_u32(r"SOFTWARE\Vendor\Product\Agent\Patch", "Timeout", 200)
            .unwrap();
        assert!(dir
            .path()
            .join("SOFTWARE/Vendor/Product/Agent/Patch/Timeout")
            .is_file());
    }

    #[test]
    fn test_missing_namespace_is_not_found() {
        let (_dir, store) = temp_store();
        let err = store.read_u32(r"Vendor\Nowhere", "Timeout").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_missing_value_in_existing_namespace_is_not_found() {
        let (_dir, store) = temp_store();
        store.write_u32(r"Vendor\Agent", "Timeout", 200).unwrap();
        let err = store.read_u32(r"Vendor\Agent", "Other").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_unparseable_value_is_backend_error() {
        let (dir, store) = temp_store();
        store.write_u32("Vendor", "Cpu", 15).unwrap();
        fs::write(dir.path().join("Vendor/Cpu"), "not a number\n").unwrap();

        let err = store.read_u32("Vendor", "Cpu").unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
    }

    #[test]
    fn test_namespace_blocked_by_file_is_backend_error() {
        let (dir, store) = temp_store();
        fs::write(dir.path().join("Vendor"), "a file, not a namespace").unwrap();

        let err = store.write_u32(r"Vendor\Agent", "Timeout", 200).unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
    }

    #[test]
    fn test_env_override_selects_the_root() {
        // Resolved the same way regardless of platform defaults.
        std::env::set_var(STORE_ROOT_ENV, "/tmp/pm-agent-test-root");
        let root = default_store_root();
        std::env::remove_var(STORE_ROOT_ENV);
        assert_eq!(root, PathBuf::from("/tmp/pm-agent-test-root"));
    }
}
