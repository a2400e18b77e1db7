//! PM Agent Performance Configuration
//!
//! This crate configures an installed PM endpoint agent for "low" or "high"
//! performance mode by writing its patch-scan timeout and scan CPU ceiling
//! into the host's machine-wide configuration store, and reads the current
//! values back for display. The store is the registry under
//! `HKEY_LOCAL_MACHINE` on Windows and a file tree under a machine-wide
//! directory elsewhere.

pub mod applier;
pub mod settings;
pub mod store;
