use log::debug;
use serde::Deserialize;
use shellexpand::env_with_context_no_errors;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("alphabet must have at least 2 symbols, got {0}")]
    AlphabetTooSmall(usize),
    #[error("alphabet symbols must be strictly increasing, found '{0}' before '{1}'")]
    UnsortedAlphabet(char, char),
    #[error("filler symbol '{0}' is not in the alphabet")]
    FillerNotInAlphabet(char),
    #[error("filler symbol '{0}' is the lowest symbol of the alphabet")]
    FillerIsZero(char),
    #[error("overflow symbol '{0}' is not in the alphabet")]
    OverflowNotInAlphabet(char),
    #[error("overflow symbol '{0}' is the lowest symbol of the alphabet")]
    OverflowIsZero(char),
    #[error("invalid initial rank range: {0}")]
    InvalidInitialRank(String),
    #[error("default depth {0} does not fit in the initial ranks")]
    InvalidDepth(usize),
}

/// Static configuration consumed by a `Ranker`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankConfig {
    /// Symbols used to render ranks, in increasing order
    pub alphabet: String,
    /// Symbol appended to a mean rank that collides with one of its bounds
    pub filler: char,
    /// Symbol appended to a rank whose increment overflows
    pub overflow: char,
    /// First rank of a freshly seeded collection
    pub lowest: String,
    /// Upper bound of the seeded range
    pub highest: String,
    /// Digit position stepped when appending, counted from the last character
    pub depth: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            alphabet: "abcdefghijklmnopqrstuvwxyz".to_string(),
            filler: 'n',
            overflow: 'z',
            lowest: "bbbbbb".to_string(),
            highest: "yyyyyy".to_string(),
            depth: 1,
        }
    }
}

/// Settings from a single configuration file (ranks.yaml)
///
/// Every key is optional so that files can be layered.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct RankConfigFile {
    alphabet: Option<String>,
    filler: Option<char>,
    overflow: Option<char>,
    lowest: Option<String>,
    highest: Option<String>,
    depth: Option<usize>,
}

impl RankConfigFile {
    fn from_reader(mut reader: impl std::io::Read) -> Result<Self, ConfigurationError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn merge(&mut self, other: Self) {
        if let Some(alphabet) = other.alphabet {
            self.alphabet = Some(alphabet);
        }
        if let Some(filler) = other.filler {
            self.filler = Some(filler);
        }
        if let Some(overflow) = other.overflow {
            self.overflow = Some(overflow);
        }
        if let Some(lowest) = other.lowest {
            self.lowest = Some(lowest);
        }
        if let Some(highest) = other.highest {
            self.highest = Some(highest);
        }
        if let Some(depth) = other.depth {
            self.depth = Some(depth);
        }
    }
}

impl From<RankConfigFile> for RankConfig {
    fn from(file: RankConfigFile) -> Self {
        let default = RankConfig::default();

        RankConfig {
            alphabet: file.alphabet.unwrap_or(default.alphabet),
            filler: file.filler.unwrap_or(default.filler),
            overflow: file.overflow.unwrap_or(default.overflow),
            lowest: file.lowest.unwrap_or(default.lowest),
            highest: file.highest.unwrap_or(default.highest),
            depth: file.depth.unwrap_or(default.depth),
        }
    }
}

static CONFIG_PATHS: &[&str] = &[
    "$HOME/.local/etc/plexorank",
    "/etc/plexorank",
    "$XDG_CONFIG_HOME/plexorank",
];

static CONFIG_FILE: &str = "ranks.yaml";

// Expand environment variables in a path
// Returns None in case of non-utf8 path
fn resolve_config_path(path: &Path) -> Option<PathBuf> {
    let context = |s: &str| match s {
        "HOME" => std::env::var("HOME").ok(),
        "XDG_CONFIG_HOME" => std::env::var("XDG_CONFIG_HOME").ok().or_else(|| {
            std::env::var("HOME")
                .ok()
                .and_then(|h| Path::new(&h).join(".config").to_str().map(String::from))
        }),
        _ => None,
    };

    Some(PathBuf::from(
        env_with_context_no_errors(path.to_str()?, context).as_ref(),
    ))
}

// Open a config file from a path, expanding environment variables
// Returns None if there was any failure (file not found, insufficient permissions, non-utf8 path, etc.)
fn open_config_path(path: &Path) -> Option<File> {
    resolve_config_path(path).and_then(|p| File::open(p).ok())
}

impl RankConfig {
    /// Parses a YAML configuration, missing keys take their default value
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, ConfigurationError> {
        Ok(RankConfigFile::from_reader(reader)?.into())
    }

    /// Reads a single YAML configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Reads the default configuration files
    ///
    /// Files found later in the search path override keys set by earlier
    /// ones. Missing files are skipped.
    pub fn from_config() -> Result<Self, ConfigurationError> {
        Self::from_paths(CONFIG_PATHS.iter().map(|dir| Path::new(dir).join(CONFIG_FILE)))
    }

    fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Result<Self, ConfigurationError> {
        let mut config = RankConfigFile::default();

        for path in paths {
            if let Some(file) = open_config_path(&path) {
                debug!("loading rank configuration from {}", path.display());
                config.merge(RankConfigFile::from_reader(BufReader::new(file))?);
            }
        }

        Ok(config.into())
    }
}
