// crates/interview-orchestrator-config/src/config.rs
// ============================================================================
// Module: Interview Orchestrator Configuration
// Description: Configuration loading and validation for the orchestrator.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: interview-orchestrator-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration comes from a TOML file with strict size and path limits,
//! from the `PUBLIC_AI_*` environment variables, or from a file followed by
//! environment overrides. Unknown keys, unparseable values, and inconsistent
//! thresholds fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use interview_orchestrator_core::FileAuditSink;
use interview_orchestrator_core::NoopAuditSink;
use interview_orchestrator_core::OrchestrationAuditSink;
use interview_orchestrator_core::OrchestratorConfig;
use interview_orchestrator_core::PhaseThresholds;
use interview_orchestrator_core::StderrAuditSink;
use interview_orchestrator_core::VersionTags;
use interview_orchestrator_core::core::config::DEFAULT_PROMPT_VERSION;
use interview_orchestrator_core::core::config::DEFAULT_RUBRIC_VERSION;
use interview_orchestrator_core::core::config::DEFAULT_SCORING_VERSION;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "interview-orchestrator.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "INTERVIEW_ORCHESTRATOR_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a version tag.
pub(crate) const MAX_VERSION_TAG_LENGTH: usize = 128;

/// Remaining-time threshold that triggers wrap-up.
pub const ENV_LOW_TIME_SEC: &str = "PUBLIC_AI_PHASE_LOW_TIME_SEC";
/// Remaining-time threshold considered critical.
pub const ENV_CRITICAL_TIME_SEC: &str = "PUBLIC_AI_PHASE_CRITICAL_TIME_SEC";
/// Answers required before leaving calibration.
pub const ENV_CALIBRATION_MIN_ANSWERS: &str = "PUBLIC_AI_PHASE_CALIBRATION_MIN_ANSWERS";
/// Answered competencies required for the core phase.
pub const ENV_CORE_MIN_COMPETENCIES: &str = "PUBLIC_AI_PHASE_CORE_MIN_COMPETENCIES";
/// Answered competencies required for deep-dive.
pub const ENV_DEEP_DIVE_MIN_COMPETENCIES: &str = "PUBLIC_AI_PHASE_DEEP_DIVE_MIN_COMPETENCIES";
/// Mean score required for deep-dive.
pub const ENV_DEEP_DIVE_MIN_AVERAGE: &str = "PUBLIC_AI_PHASE_DEEP_DIVE_MIN_AVERAGE";
/// Fatigue signals that force wrap-up.
pub const ENV_WRAP_UP_FATIGUE_SIGNALS: &str = "PUBLIC_AI_PHASE_WRAP_UP_FATIGUE_SIGNALS";
/// Consecutive non-answers that force wrap-up.
pub const ENV_WRAP_UP_NON_ANSWER_STREAK: &str = "PUBLIC_AI_PHASE_WRAP_UP_NON_ANSWER_STREAK";
/// Prompt version tag.
pub const ENV_PROMPT_VERSION: &str = "PUBLIC_AI_VOICE_PROMPT_VERSION";
/// Rubric version tag.
pub const ENV_RUBRIC_VERSION: &str = "PUBLIC_AI_RUBRIC_VERSION";
/// Scoring version tag.
pub const ENV_SCORING_VERSION: &str = "PUBLIC_AI_SCORING_VERSION";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Interview orchestrator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewOrchestratorConfig {
    /// Phase transition thresholds.
    #[serde(default)]
    pub phase: PhaseConfig,
    /// Default version tags for new sessions.
    #[serde(default)]
    pub versions: VersionConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl InterviewOrchestratorConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is the argument, else `INTERVIEW_ORCHESTRATOR_CONFIG`, else
    /// `interview-orchestrator.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed or
    /// the result fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from defaults plus variables returned by `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed or
    /// the result fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields with the `PUBLIC_AI_*` variables returned by `lookup`.
    ///
    /// Unset or blank variables leave the field unchanged. Validation is left
    /// to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the variable that failed to parse.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|value| value.trim().to_string());
        let read = |name: &str| read(name).filter(|value| !value.is_empty());

        let phase = &mut self.phase;
        override_number(&read, ENV_LOW_TIME_SEC, &mut phase.low_time_sec)?;
        override_number(&read, ENV_CRITICAL_TIME_SEC, &mut phase.critical_time_sec)?;
        override_number(&read, ENV_CALIBRATION_MIN_ANSWERS, &mut phase.calibration_min_answers)?;
        override_number(&read, ENV_CORE_MIN_COMPETENCIES, &mut phase.core_min_competencies)?;
        override_number(
            &read,
            ENV_DEEP_DIVE_MIN_COMPETENCIES,
            &mut phase.deep_dive_min_competencies,
        )?;
        override_number(&read, ENV_DEEP_DIVE_MIN_AVERAGE, &mut phase.deep_dive_min_average)?;
        override_number(&read, ENV_WRAP_UP_FATIGUE_SIGNALS, &mut phase.wrap_up_fatigue_signals)?;
        override_number(
            &read,
            ENV_WRAP_UP_NON_ANSWER_STREAK,
            &mut phase.wrap_up_non_answer_streak,
        )?;

        let versions = &mut self.versions;
        if let Some(value) = read(ENV_PROMPT_VERSION) {
            versions.prompt_version = value;
        }
        if let Some(value) = read(ENV_RUBRIC_VERSION) {
            versions.rubric_version = value;
        }
        if let Some(value) = read(ENV_SCORING_VERSION) {
            versions.scoring_version = value;
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.phase.validate()?;
        self.versions.validate()?;
        self.audit.validate()
    }

    /// Returns the engine configuration snapshot.
    #[must_use]
    pub fn to_orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            thresholds: self.phase.to_thresholds(),
            versions: self.versions.to_version_tags(),
        }
    }

    /// Builds the audit sink selected by the audit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit log file cannot be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn OrchestrationAuditSink>, ConfigError> {
        self.audit.build_sink()
    }
}

/// Phase transition thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhaseConfig {
    /// Remaining seconds at or below which the interview wraps up.
    pub low_time_sec: u64,
    /// Remaining seconds at or below which time is critical.
    pub critical_time_sec: u64,
    /// Answers required before leaving calibration.
    pub calibration_min_answers: u32,
    /// Answered competencies required for the core phase.
    pub core_min_competencies: u32,
    /// Answered competencies required for deep-dive.
    pub deep_dive_min_competencies: u32,
    /// Mean score across answered competencies required for deep-dive.
    pub deep_dive_min_average: f64,
    /// Fatigue signals that force wrap-up.
    pub wrap_up_fatigue_signals: u32,
    /// Consecutive non-answers that force wrap-up.
    pub wrap_up_non_answer_streak: u32,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        let thresholds = PhaseThresholds::default();
        Self {
            low_time_sec: thresholds.low_time_sec,
            critical_time_sec: thresholds.critical_time_sec,
            calibration_min_answers: thresholds.calibration_min_answers,
            core_min_competencies: thresholds.core_min_competencies,
            deep_dive_min_competencies: thresholds.deep_dive_min_competencies,
            deep_dive_min_average: thresholds.deep_dive_min_average,
            wrap_up_fatigue_signals: thresholds.wrap_up_fatigue_signals,
            wrap_up_non_answer_streak: thresholds.wrap_up_non_answer_streak,
        }
    }
}

impl PhaseConfig {
    /// Validates threshold ordering and ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.critical_time_sec > self.low_time_sec {
            return Err(ConfigError::Invalid(
                "phase.critical_time_sec must not exceed phase.low_time_sec".to_string(),
            ));
        }
        for (field, value) in [
            ("phase.calibration_min_answers", self.calibration_min_answers),
            ("phase.core_min_competencies", self.core_min_competencies),
            ("phase.deep_dive_min_competencies", self.deep_dive_min_competencies),
            ("phase.wrap_up_fatigue_signals", self.wrap_up_fatigue_signals),
            ("phase.wrap_up_non_answer_streak", self.wrap_up_non_answer_streak),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{field} must be at least 1")));
            }
        }
        if self.core_min_competencies > self.deep_dive_min_competencies {
            return Err(ConfigError::Invalid(
                "phase.core_min_competencies must not exceed phase.deep_dive_min_competencies"
                    .to_string(),
            ));
        }
        if !self.deep_dive_min_average.is_finite() || self.deep_dive_min_average < 0.0 {
            return Err(ConfigError::Invalid(
                "phase.deep_dive_min_average must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts to engine thresholds.
    const fn to_thresholds(&self) -> PhaseThresholds {
        PhaseThresholds {
            low_time_sec: self.low_time_sec,
            critical_time_sec: self.critical_time_sec,
            calibration_min_answers: self.calibration_min_answers,
            core_min_competencies: self.core_min_competencies,
            deep_dive_min_competencies: self.deep_dive_min_competencies,
            deep_dive_min_average: self.deep_dive_min_average,
            wrap_up_fatigue_signals: self.wrap_up_fatigue_signals,
            wrap_up_non_answer_streak: self.wrap_up_non_answer_streak,
        }
    }
}

/// Version tags stamped onto new orchestration records.
///
/// The contract version is fixed by the engine and not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionConfig {
    /// Prompt version tag.
    pub prompt_version: String,
    /// Rubric version tag.
    pub rubric_version: String,
    /// Scoring version tag.
    pub scoring_version: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            prompt_version: DEFAULT_PROMPT_VERSION.to_string(),
            rubric_version: DEFAULT_RUBRIC_VERSION.to_string(),
            scoring_version: DEFAULT_SCORING_VERSION.to_string(),
        }
    }
}

impl VersionConfig {
    /// Validates that every tag is present and bounded.
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("versions.prompt_version", &self.prompt_version),
            ("versions.rubric_version", &self.rubric_version),
            ("versions.scoring_version", &self.scoring_version),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
            }
            if value.len() > MAX_VERSION_TAG_LENGTH {
                return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
            }
        }
        Ok(())
    }

    /// Converts to engine version tags.
    fn to_version_tags(&self) -> VersionTags {
        VersionTags {
            prompt_version: self.prompt_version.clone(),
            rubric_version: self.rubric_version.clone(),
            scoring_version: self.scoring_version.clone(),
            ..VersionTags::default()
        }
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Enable structured audit logging.
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when absent.
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }

    /// Builds the configured sink.
    fn build_sink(&self) -> Result<Arc<dyn OrchestrationAuditSink>, ConfigError> {
        if !self.enabled {
            return Ok(Arc::new(NoopAuditSink));
        }
        match &self.path {
            Some(path) => {
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            None => Ok(Arc::new(StderrAuditSink)),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path using CLI args or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Parses a numeric environment override into `target` when set.
fn override_number<T, R>(read: &R, name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    R: Fn(&str) -> Option<String>,
{
    if let Some(raw) = read(name) {
        *target = raw
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{name} must be a number, got '{raw}'")))?;
    }
    Ok(())
}
