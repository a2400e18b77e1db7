//! Configuration applier.
//!
//! Writes the preset values for a performance mode into the settings store
//! and reads the current state back for display. Store failures are captured
//! as report data, never propagated as panics or process aborts: a failed
//! write is logged and counted, and a failed read becomes a sentinel display
//! value.

use std::fmt;

use tracing::{error, info, warn};

use crate::settings::{AgentSetting, PerformanceMode, MANAGED_SETTINGS};
use crate::store::{SettingsStore, StoreError};

/// Outcome of one attempted setting write.
#[derive(Debug)]
pub struct SettingWrite {
    /// The setting that was written.
    pub setting: AgentSetting,

    /// Value the preset calls for.
    pub value: u32,

    /// Store outcome; failures carry the classified store error.
    pub result: Result<(), StoreError>,
}

/// Aggregate outcome of applying one performance mode.
///
/// Built fresh on every `apply` call and consumed for reporting; partial
/// success is visible as `applied() < attempted()`.
#[derive(Debug)]
pub struct ApplyReport {
    /// Mode that was applied.
    pub mode: PerformanceMode,

    /// Per-setting outcomes, in write order.
    pub writes: Vec<SettingWrite>,
}

impl ApplyReport {
    /// Number of settings written successfully.
    pub fn applied(&self) -> usize {
        self.writes.iter().filter(|w| w.result.is_ok()).count()
    }

    /// Number of settings attempted.
    pub fn attempted(&self) -> usize {
        self.writes.len()
    }

    /// True when every setting was written.
    pub fn all_applied(&self) -> bool {
        self.applied() == self.attempted()
    }
}

/// Current value of one managed setting, as read for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// The store holds this value.
    Set(u32),

    /// Namespace or value absent; the agent falls back to its built-in
    /// default.
    NotSet,

    /// The store could not be read.
    Unreadable(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Set(value) => write!(f, "{value}"),
            SettingValue::NotSet => f.write_str("Not set"),
            SettingValue::Unreadable(detail) => write!(f, "Error: {detail}"),
        }
    }
}

/// One row of status output.
#[derive(Debug)]
pub struct SettingReading {
    pub setting: AgentSetting,
    pub value: SettingValue,
}

/// Applies performance presets against an injected settings store.
pub struct ConfigApplier<S> {
    store: S,
}

impl<S: SettingsStore> ConfigApplier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Write both settings for `mode`, scan timeout first.
    ///
    /// The write order is fixed only so logs stay reproducible; the two
    /// settings are independent. A failed write is recorded and does not
    /// stop the remaining write. There is no rollback: an earlier successful
    /// write stays in place regardless of what happens after it.
    pub fn apply(&self, mode: PerformanceMode) -> ApplyReport {
        info!(mode = %mode, "configuring agent performance mode");

        let writes = mode
            .planned_writes()
            .into_iter()
            .map(|(setting, value)| SettingWrite {
                setting,
                value,
                result: self.write_setting(setting, value),
            })
            .collect();

        let report = ApplyReport { mode, writes };
        if report.all_applied() {
            info!(mode = %report.mode, "agent performance mode configured");
        } else {
            warn!(
                mode = %report.mode,
                "{}/{} settings applied",
                report.applied(),
                report.attempted(),
            );
        }
        report
    }

    /// Read the current value of every managed setting, in canonical order.
    ///
    /// Reads are independent: each failure is captured as display data and
    /// never interrupts the other read. Absent namespaces and absent values
    /// both surface as `NotSet`.
    pub fn read_current(&self) -> Vec<SettingReading> {
        MANAGED_SETTINGS
            .iter()
            .map(|&setting| SettingReading {
                setting,
                value: match self.store.read_u32(setting.namespace, setting.name) {
                    Ok(value) => SettingValue::Set(value),
                    Err(StoreError::NotFound { .. }) => SettingValue::NotSet,
                    Err(e) => SettingValue::Unreadable(e.to_string()),
                },
            })
            .collect()
    }

    fn write_setting(&self, setting: AgentSetting, value: u32) -> Result<(), StoreError> {
        match self.store.write_u32(setting.namespace, setting.name, value) {
            Ok(()) => {
                info!(path = %setting.qualified_name(), value, "set agent setting");
                Ok(())
            }
            Err(e) => {
                match &e {
                    StoreError::PermissionDenied { .. } => {
                        error!(
                            path = %setting.qualified_name(),
                            value,
                            "permission denied; run with administrative rights"
                        );
                    }
                    _ => {
                        error!(
                            path = %setting.qualified_name(),
                            value,
                            error = %e,
                            "failed to write agent setting"
                        );
                    }
                }
                Err(e)
            }
        }
    }
}
