use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// A configuration value that cannot drive a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConfig {
    GrowSpeed(f32),
    RecursionDepth(u32),
    SproutProbability(f32),
    TimeStep(f32),
    FillOpacity(f32),
    EmptyPalette,
}

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConfig::GrowSpeed(v) => {
                write!(f, "grow_speed must be a positive finite number (got {v})")
            }
            InvalidConfig::RecursionDepth(v) => {
                write!(f, "max_recursion_depth must be at least 1 (got {v})")
            }
            InvalidConfig::SproutProbability(v) => {
                write!(f, "sprout_probability must lie in [0, 1] (got {v})")
            }
            InvalidConfig::TimeStep(v) => write!(f, "dt must be finite (got {v})"),
            InvalidConfig::FillOpacity(v) => {
                write!(f, "fill_opacity must lie in [0, 1] (got {v})")
            }
            InvalidConfig::EmptyPalette => write!(f, "palette must contain at least one color"),
        }
    }
}

impl StdError for InvalidConfig {}

#[derive(Debug)]
pub enum Error {
    InvalidConfiguration(InvalidConfig),
    UnknownPalette(String),
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, message: String },
    UnsupportedFormat(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(e) => write!(f, "invalid configuration: {e}"),
            Error::UnknownPalette(name) => write!(f, "unknown palette `{name}`"),
            Error::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Error::Parse { path, message } => {
                write!(f, "failed to parse {}: {message}", path.display())
            }
            Error::UnsupportedFormat(path) => write!(
                f,
                "unsupported config format for {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        }
    }
}

impl From<InvalidConfig> for Error {
    fn from(err: InvalidConfig) -> Self {
        Error::InvalidConfiguration(err)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidConfiguration(e) => Some(e),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
