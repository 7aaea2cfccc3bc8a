//! Configuration loading for pai-hooks
//!
//! Supports TOML configuration with embedded defaults. The config is loaded
//! once per process and never mutated afterwards.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// PAI base directory (falls back to `$PAI_DIR`, then `~/.claude`)
    pub pai_dir: Option<String>,

    /// Enable the security event log
    pub audit_log: bool,

    /// Path to the security event log (defaults under `pai_dir`)
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            pai_dir: None,
            audit_log: true,
            audit_path: None,
        }
    }
}

/// Security validator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// How long to wait for the PreToolUse payload
    pub stdin_timeout_ms: u64,

    /// Characters of the command kept in security event records
    pub log_command_chars: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            stdin_timeout_ms: 100,
            log_command_chars: 200,
        }
    }
}

/// Task scope analyzer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// How long to wait for the UserPromptSubmit payload
    pub stdin_timeout_ms: u64,

    /// Prompts shorter than this never get guidance
    pub min_prompt_chars: usize,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            stdin_timeout_ms: 3000,
            min_prompt_chars: 5,
        }
    }
}

/// Persistence (Stop hook) configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub stdin_timeout_ms: u64,

    /// Safety stop after this many continuations in one session
    pub max_iterations: u32,

    /// Path to the iteration counter file (defaults under `pai_dir`)
    pub state_file: Option<String>,

    /// Transcript entries scanned for a completion signal
    pub recent_lines: usize,

    /// Transcript entries scanned for repeated errors
    pub stuck_window: usize,

    /// Identical errors needed to consider the session stuck
    pub stuck_threshold: usize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            stdin_timeout_ms: 3000,
            max_iterations: 50,
            state_file: None,
            recent_lines: 10,
            stuck_window: 20,
            stuck_threshold: 3,
        }
    }
}

/// Agent spawner configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Directory holding `<name>.md` agent definitions
    pub agents_dir: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            agents_dir: "~/.claude/Agents".to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub validator: ValidatorConfig,
    pub scope: ScopeConfig,
    pub persistence: PersistenceConfig,
    pub agents: AgentsConfig,
}

impl Config {
    /// Load configuration from the standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/pai-hooks/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/pai-hooks/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("[pai-hooks] Warning: {}: {}", path.display(), e);
                    }
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Resolve the PAI base directory
    pub fn pai_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.general.pai_dir {
            return Self::expand_path(dir);
        }
        if let Ok(dir) = env::var("PAI_DIR") {
            if !dir.is_empty() {
                return Self::expand_path(&dir);
            }
        }
        Self::expand_path("~/.claude")
    }

    /// Get the security event log path, if logging is enabled
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        Some(match self.general.audit_path {
            Some(ref p) => Self::expand_path(p),
            None => self
                .pai_dir()
                .join("history/security/security-events.jsonl"),
        })
    }

    /// Get the persistence state file path
    pub fn state_path(&self) -> PathBuf {
        match self.persistence.state_file {
            Some(ref p) => Self::expand_path(p),
            None => self.pai_dir().join("state/persistence-state.json"),
        }
    }

    /// Get the agents directory (expanded)
    pub fn agents_dir(&self) -> PathBuf {
        Self::expand_path(&self.agents.agents_dir)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true

[validator]
stdin_timeout_ms = 100
log_command_chars = 200

[scope]
stdin_timeout_ms = 3000
min_prompt_chars = 5

[persistence]
stdin_timeout_ms = 3000
max_iterations = 50
recent_lines = 10
stuck_window = 20
stuck_threshold = 3

[agents]
agents_dir = "~/.claude/Agents"
"#;
