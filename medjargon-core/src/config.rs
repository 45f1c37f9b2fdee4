use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

use crate::{Error, InternalResult};

/// Service configuration, usually read from a JSON file.
///
/// Every field has a default so a partial file (or `{}`) parses. Data paths
/// have no default: the lexicon must be named explicitly and definitions are
/// optional. Relative paths read from a file resolve against its directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,

    #[serde(default)]
    pub definitions_path: Option<PathBuf>,

    /// Longest accepted input text, in characters.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Time limit for one lexicon scan.
    #[serde(default = "default_scan_timeout", with = "duration_ms")]
    pub scan_timeout: Duration,

    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// OpenAI-compatible base URL; the library default is used when unset.
    #[serde(default)]
    pub api_base: Option<String>,

    #[serde(default = "default_request_timeout", with = "duration_ms")]
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            definitions_path: None,
            max_text_length: default_max_text_length(),
            scan_timeout: default_scan_timeout(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_base: None,
            request_timeout: default_request_timeout(),
        }
    }
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        let path = path.as_ref();
        let config: Self = from_file(path)?;
        Ok(match path.parent() {
            Some(base) => config.resolve_paths(base),
            None => config,
        })
    }

    /// Joins relative data paths onto `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.lexicon_path = self.lexicon_path.map(resolve);
        self.definitions_path = self.definitions_path.map(resolve);
        self
    }

    /// The configured lexicon path, or a config error when none is set.
    pub fn require_lexicon_path(&self) -> InternalResult<&Path> {
        self.lexicon_path
            .as_deref()
            .ok_or_else(|| Error::Config("no lexicon_path configured".to_string()))
    }

    pub fn from_json(s: &str) -> InternalResult<Self> {
        from_str(s)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::Config(format!(
            "Failed to open config file {}: {}",
            path.display(),
            e
        ))
    })?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_max_text_length() -> usize {
    100_000
}
fn default_scan_timeout() -> Duration {
    Duration::from_secs(10)
}
fn default_true() -> bool {
    true
}
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_temperature() -> f32 {
    0.0
}
fn default_max_tokens() -> u32 {
    512
}
fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
