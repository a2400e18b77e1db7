//! Windows registry settings store.
//!
//! The agent's machine-wide settings live under `HKEY_LOCAL_MACHINE` as
//! REG_DWORD values. The fixed namespaces already target the WOW6432Node
//! view, so no access-flag redirection is needed. Creating or writing a key
//! under HKLM requires an elevated process; unelevated attempts surface as
//! `StoreError::PermissionDenied`.

use winreg::enums::HKEY_LOCAL_MACHINE;
use winreg::RegKey;

use super::{SettingsStore, StoreError};

/// Settings store over the Windows registry.
pub struct RegistryStore {
    hive: RegKey,
}

impl RegistryStore {
    /// Store rooted at `HKEY_LOCAL_MACHINE`, where the agent keeps its
    /// machine-wide configuration.
    pub fn local_machine() -> Self {
        Self {
            hive: RegKey::predef(HKEY_LOCAL_MACHINE),
        }
    }
}

impl SettingsStore for RegistryStore {
    fn write_u32(&self, namespace: &str, name: &str, value: u32) -> Result<(), StoreError> {
        // create_subkey opens the key when it already exists and creates any
        // missing path segments otherwise. The handle drops on return.
        let (key, _disposition) = self
            .hive
            .create_subkey(namespace)
            .map_err(|e| StoreError::from_io(namespace, e))?;

        key.set_value(name, &value)
            .map_err(|e| StoreError::from_io(format!(r"{namespace}\{name}"), e))
    }

    fn read_u32(&self, namespace: &str, name: &str) -> Result<u32, StoreError> {
        let key = self
            .hive
            .open_subkey(namespace)
            .map_err(|e| StoreError::from_io(namespace, e))?;

        key.get_value(name)
            .map_err(|e| StoreError::from_io(format!(r"{namespace}\{name}"), e))
    }
}
