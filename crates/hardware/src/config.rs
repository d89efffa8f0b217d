//! Configuration system for the emulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline constants for the stack layout and tracing.
//! 2. **Structures:** `general` (tracing, step limit) and `memory` (stack
//!    placement, region size limit).
//! 3. **Loading:** JSON from a string or a file; every field is optional.
//!
//! Use `Config::default()` when no file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the emulator.
mod defaults {
    /// Highest stack address (exclusive): the top of the 47-bit user range.
    pub const STACK_TOP: u64 = 0x0000_8000_0000_0000;

    /// Size of the mapped stack region (8 MiB).
    pub const STACK_SIZE: u64 = 8 * 1024 * 1024;

    /// Bytes kept free above the initial stack pointer.
    ///
    /// Leaves room for the argument vector, environment and auxiliary vector
    /// an operating system would place there.
    pub const STACK_RESERVE: u64 = 12_800;

    /// Largest image or stack region the loader will allocate (1 GiB).
    pub const MAX_REGION_SIZE: u64 = 1 << 30;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use a64emu_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_instructions);
/// assert_eq!(config.general.max_instructions, None);
/// assert_eq!(config.memory.stack_size, 8 * 1024 * 1024);
/// ```
///
/// Sections and fields may be omitted:
///
/// ```
/// use a64emu_core::config::Config;
///
/// let config = Config::from_json_str(r#"{
///     "general": { "max_instructions": 1000 },
///     "memory": { "stack_top": 1099511627776 }
/// }"#).unwrap();
/// assert_eq!(config.general.max_instructions, Some(1000));
/// assert_eq!(config.memory.stack_top, 0x100_0000_0000);
/// assert_eq!(config.memory.stack_reserve, 12_800);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// General run settings.
    pub general: GeneralConfig,
    /// Process memory layout.
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// General run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Emit a trace event for every executed instruction.
    pub trace_instructions: bool,

    /// Stop after this many instructions; `None` runs until a fault.
    pub max_instructions: Option<u64>,
}

/// Process memory layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Highest stack address (exclusive).
    pub stack_top: u64,

    /// Size of the stack region in bytes.
    pub stack_size: u64,

    /// Bytes kept free between the initial stack pointer and `stack_top`.
    pub stack_reserve: u64,

    /// Upper bound on the size of any single loaded region, in bytes.
    pub max_region_size: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            stack_top: defaults::STACK_TOP,
            stack_size: defaults::STACK_SIZE,
            stack_reserve: defaults::STACK_RESERVE,
            max_region_size: defaults::MAX_REGION_SIZE,
        }
    }
}
