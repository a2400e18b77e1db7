//! Managed agent settings and performance presets.
//!
//! The PM endpoint agent exposes two machine-wide tunables: how long a patch
//! scan may run and how much CPU the scan thread may consume. Both live at
//! fixed, well-known locations in the host configuration store. The preset
//! table maps the two supported performance modes onto concrete values; it is
//! exhaustive by construction, so looking up a mode can never fail.

use std::fmt;

use clap::ValueEnum;

/// Store namespace holding the patch subsystem settings.
pub const PATCH_KEY: &str = r"SOFTWARE\WOW6432Node\AdventNet\DesktopCentral\DCAgent\Patch";

/// Store namespace holding the general agent settings.
pub const AGENT_KEY: &str = r"SOFTWARE\WOW6432Node\AdventNet\DesktopCentral\DCAgent";

/// Identity of one managed setting: where it lives in the store and how it
/// is labelled in status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSetting {
    /// Human-readable label for status output.
    pub label: &'static str,

    /// Store namespace (registry-style path) the value lives under.
    pub namespace: &'static str,

    /// Value name within the namespace.
    pub name: &'static str,
}

impl AgentSetting {
    /// Fully qualified path of the value, for logs and error context.
    pub fn qualified_name(&self) -> String {
        format!(r"{}\{}", self.namespace, self.name)
    }
}

/// Maximum wall-clock seconds a patch scan may run.
pub const PATCH_SCAN_TIMEOUT: AgentSetting = AgentSetting {
    label: "Patch Scan Timeout",
    namespace: PATCH_KEY,
    name: "Patch_scan_timeout",
};

/// CPU ceiling for the scan worker thread, in percent.
pub const THREAD_MAX_CPU_USAGE: AgentSetting = AgentSetting {
    label: "Thread Max CPU Usage",
    namespace: AGENT_KEY,
    name: "THRDMAXCPUUSAGE_2C",
};

/// The settings this tool manages, in canonical order: the scan timeout
/// first, then the CPU ceiling. Apply and status both follow this order so
/// logs and output stay reproducible.
pub const MANAGED_SETTINGS: [AgentSetting; 2] = [PATCH_SCAN_TIMEOUT, THREAD_MAX_CPU_USAGE];

/// Agent resource-utilization presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PerformanceMode {
    /// Low resource usage: scans capped at 15% CPU.
    Low,
    /// High resource usage: scans capped at 30% CPU.
    High,
}

/// Concrete setting values for one performance mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetProfile {
    /// Patch scan timeout in seconds.
    pub scan_timeout_secs: u32,

    /// Scan thread CPU ceiling in percent.
    pub max_cpu_percent: u32,
}

impl PerformanceMode {
    /// Mode name as written on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceMode::Low => "low",
            PerformanceMode::High => "high",
        }
    }

    /// Setting values for this mode.
    ///
    /// Every mode provides a value for every managed setting; only the CPU
    /// ceiling differs between the presets.
    pub fn profile(self) -> PresetProfile {
        match self {
            PerformanceMode::Low => PresetProfile {
                scan_timeout_secs: 200,
                max_cpu_percent: 15,
            },
            PerformanceMode::High => PresetProfile {
                scan_timeout_secs: 200,
                max_cpu_percent: 30,
            },
        }
    }

    /// The writes `apply` performs for this mode, in canonical order.
    pub fn planned_writes(self) -> [(AgentSetting, u32); 2] {
        let profile = self.profile();
        [
            (PATCH_SCAN_TIMEOUT, profile.scan_timeout_secs),
            (THREAD_MAX_CPU_USAGE, profile.max_cpu_percent),
        ]
    }
}

impl fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
