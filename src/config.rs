//! Configuration types and validation for the sanitization simulator

use std::{fmt, fs, path::Path, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::hash::HashAlgorithm;

/// Number of overwrite passes a run performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PassCount {
    One,
    Three,
    Seven,
    ThirtyFive,
}

impl PassCount {
    pub const ALL: [PassCount; 4] = [
        PassCount::One,
        PassCount::Three,
        PassCount::Seven,
        PassCount::ThirtyFive,
    ];

    pub fn get(self) -> u32 {
        match self {
            PassCount::One => 1,
            PassCount::Three => 3,
            PassCount::Seven => 7,
            PassCount::ThirtyFive => 35,
        }
    }

    pub fn tier(self) -> ComplianceTier {
        ComplianceTier::for_passes(self.get())
    }
}

impl Default for PassCount {
    fn default() -> Self {
        PassCount::Three
    }
}

impl TryFrom<u32> for PassCount {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(PassCount::One),
            3 => Ok(PassCount::Three),
            7 => Ok(PassCount::Seven),
            35 => Ok(PassCount::ThirtyFive),
            other => Err(Error::InvalidPassCount(other)),
        }
    }
}

impl From<PassCount> for u32 {
    fn from(passes: PassCount) -> Self {
        passes.get()
    }
}

impl fmt::Display for PassCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Compliance tier attached to a certificate, derived from the pass count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceTier {
    NistClear,
    DodClass,
    GutmannClass,
}

impl ComplianceTier {
    pub fn for_passes(passes: u32) -> Self {
        if passes >= 35 {
            ComplianceTier::GutmannClass
        } else if passes >= 7 {
            ComplianceTier::DodClass
        } else {
            ComplianceTier::NistClear
        }
    }

    /// Standard written on the certificate
    pub fn standard(self) -> &'static str {
        match self {
            ComplianceTier::NistClear => "NIST SP 800-88 Rev. 1 Clear",
            ComplianceTier::DodClass => "DoD 5220.22-M",
            ComplianceTier::GutmannClass => "Gutmann Method (35-Pass)",
        }
    }

    /// Protocol named by the initiation log line
    pub fn protocol(self) -> &'static str {
        match self {
            ComplianceTier::NistClear => "NIST SP 800-88 REV 1 CLEAR",
            ComplianceTier::DodClass => "DOD 5220.22-M OVERWRITE",
            ComplianceTier::GutmannClass => "GUTMANN 35-PASS PURGE",
        }
    }

    /// Short badge shown next to the pass selector
    pub fn badge(self) -> &'static str {
        match self {
            ComplianceTier::NistClear => "NIST CLEAR",
            ComplianceTier::DodClass => "DOD 5220.22-M",
            ComplianceTier::GutmannClass => "GUTMANN METHOD",
        }
    }
}

impl fmt::Display for ComplianceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComplianceTier::NistClear => "NIST-clear",
            ComplianceTier::DodClass => "DoD-class",
            ComplianceTier::GutmannClass => "Gutmann-class",
        };
        write!(f, "{}", name)
    }
}

/// Settings fixed for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub pass_count: PassCount,
}

impl SimulationConfig {
    pub fn new(pass_count: PassCount) -> Self {
        Self { pass_count }
    }

    pub fn tier(&self) -> ComplianceTier {
        self.pass_count.tier()
    }

    /// Number of phase steps a full run advances through
    pub fn total_steps(&self) -> u32 {
        self.pass_count.get() * crate::simulator::WipePhase::ALL.len() as u32
    }
}

/// Timing of the simulated sub-steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub sub_steps_per_phase: u32,
    pub sub_step_delay_ms: u64,
    pub finalize_delay_ms: u64,
}

impl PacingConfig {
    /// Pacing with every delay set to zero
    pub fn immediate() -> Self {
        Self {
            sub_step_delay_ms: 0,
            finalize_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn sub_step_delay(&self) -> Duration {
        Duration::from_millis(self.sub_step_delay_ms)
    }

    pub fn finalize_delay(&self) -> Duration {
        Duration::from_millis(self.finalize_delay_ms)
    }
}

/// Branding and synthesized certificate fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    pub tool_version: String,
    pub product_prefix: String,
    pub certificate_prefix: String,
    pub volume_path_prefix: String,
    pub verification_base_url: String,
}

/// Defaults applied to a fresh session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    pub pass_count: PassCount,
    pub hash_algorithm: HashAlgorithm,
}

/// Top-level configuration, loadable from JSON or YAML
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub product: ProductConfig,
    pub pacing: PacingConfig,
    pub defaults: SessionDefaults,
}

// Defaults
impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            sub_steps_per_phase: 5,
            sub_step_delay_ms: 80,
            finalize_delay_ms: 1000,
        }
    }
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            tool_version: "SecureWiper Enterprise v4.0".into(),
            product_prefix: "SecureWiper".into(),
            certificate_prefix: "SWC".into(),
            volume_path_prefix: "/volumes/secure_raid/partition_0/secure_vault/".into(),
            verification_base_url: "https://verify.securewiper.io/v/".into(),
        }
    }
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            pass_count: PassCount::default(),
            hash_algorithm: HashAlgorithm::Sha256,
        }
    }
}

/// Validated key/value access to a configuration section
pub trait ConfigSection {
    fn validate(&self) -> Result<()>;
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

impl ConfigSection for PacingConfig {
    fn validate(&self) -> Result<()> {
        if self.sub_steps_per_phase == 0 {
            return Err(ConfigError::Invalid("At least one sub-step per phase is required".into()).into());
        }
        if self.sub_step_delay_ms > 60_000 || self.finalize_delay_ms > 60_000 {
            return Err(ConfigError::Invalid("Delays above one minute are not supported".into()).into());
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        match key {
            "sub_steps_per_phase" => Some(self.sub_steps_per_phase.to_string()),
            "sub_step_delay_ms" => Some(self.sub_step_delay_ms.to_string()),
            "finalize_delay_ms" => Some(self.finalize_delay_ms.to_string()),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "sub_steps_per_phase" => self.sub_steps_per_phase = parse_value(key, &value)?,
            "sub_step_delay_ms" => self.sub_step_delay_ms = parse_value(key, &value)?,
            "finalize_delay_ms" => self.finalize_delay_ms = parse_value(key, &value)?,
            _ => return Err(ConfigError::UnknownKey(format!("pacing.{}", key)).into()),
        }
        Ok(())
    }
}

impl ConfigSection for ProductConfig {
    fn validate(&self) -> Result<()> {
        if self.product_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("Product prefix must not be empty".into()).into());
        }
        if self.certificate_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("Certificate prefix must not be empty".into()).into());
        }
        if !self.verification_base_url.starts_with("http") {
            return Err(ConfigError::Invalid(format!(
                "Verification base URL must be http(s): {}",
                self.verification_base_url
            ))
            .into());
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        match key {
            "tool_version" => Some(self.tool_version.clone()),
            "product_prefix" => Some(self.product_prefix.clone()),
            "certificate_prefix" => Some(self.certificate_prefix.clone()),
            "volume_path_prefix" => Some(self.volume_path_prefix.clone()),
            "verification_base_url" => Some(self.verification_base_url.clone()),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "tool_version" => self.tool_version = value,
            "product_prefix" => self.product_prefix = value,
            "certificate_prefix" => self.certificate_prefix = value,
            "volume_path_prefix" => self.volume_path_prefix = value,
            "verification_base_url" => self.verification_base_url = value,
            _ => return Err(ConfigError::UnknownKey(format!("product.{}", key)).into()),
        }
        Ok(())
    }
}

impl ConfigSection for SessionDefaults {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        match key {
            "pass_count" => Some(self.pass_count.to_string()),
            "hash_algorithm" => Some(self.hash_algorithm.to_string()),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "pass_count" => {
                let raw: u32 = parse_value(key, &value)?;
                self.pass_count = PassCount::try_from(raw)?;
            }
            "hash_algorithm" => self.hash_algorithm = parse_value(key, &value)?,
            _ => return Err(ConfigError::UnknownKey(format!("defaults.{}", key)).into()),
        }
        Ok(())
    }
}

impl ConfigSection for AppConfig {
    fn validate(&self) -> Result<()> {
        self.product.validate()?;
        self.pacing.validate()?;
        self.defaults.validate()
    }

    fn get(&self, key: &str) -> Option<String> {
        let (section, field) = key.split_once('.')?;
        match section {
            "product" => self.product.get(field),
            "pacing" => self.pacing.get(field),
            "defaults" => self.defaults.get(field),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let (section, field) = key
            .split_once('.')
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        match section {
            "product" => self.product.set(field, value),
            "pacing" => self.pacing.set(field, value),
            "defaults" => self.defaults.set(field, value),
            _ => Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
    }
}

impl FromStr for AppConfig {
    type Err = Error;

    /// Parses JSON first, then YAML
    fn from_str(content: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        content.parse()
    }

    /// Applies a `section.key=value` override
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::Parse(format!("Expected key=value, got '{}'", assignment)))?;
        self.set(key.trim(), value.trim().to_string())?;
        self.validate()
    }
}
