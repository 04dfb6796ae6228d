//! Policy file loading and command-line overrides.
//!
//! A policy file is TOML:
//!
//! ```toml
//! work_start = "09:00"
//! work_end = "17:00"
//! default_buffer_minutes = 10
//! ```
//!
//! Every key is optional; missing keys fall back to the built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use slot_engine::policy::parse_hhmm;
use slot_engine::SchedulingPolicy;

/// Read a policy from `path`, or the defaults when no path is given.
pub fn load_policy(path: Option<&Path>) -> Result<SchedulingPolicy> {
    let Some(path) = path else {
        return Ok(SchedulingPolicy::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let policy: SchedulingPolicy = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    tracing::debug!(?policy, path = %path.display(), "loaded scheduling policy");
    Ok(policy)
}

/// Apply `--work-start` / `--work-end` flags on top of a loaded policy.
pub fn apply_overrides(
    mut policy: SchedulingPolicy,
    work_start: Option<&str>,
    work_end: Option<&str>,
) -> Result<SchedulingPolicy> {
    if let Some(raw) = work_start {
        policy.work_start = parse_hhmm(raw)
            .with_context(|| format!("Invalid --work-start '{}': expected HH:MM", raw))?;
    }
    if let Some(raw) = work_end {
        policy.work_end = parse_hhmm(raw)
            .with_context(|| format!("Invalid --work-end '{}': expected HH:MM", raw))?;
    }
    Ok(policy)
}
