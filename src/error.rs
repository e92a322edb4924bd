use std::{borrow::Cow, path::PathBuf};

/// Everything that can go wrong outside the game itself. The game logic is infallible; only the edges aren't.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An `io::Error` occurred, e.g. while talking to the terminal.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file couldn't be read.
    #[error("couldn't read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file was read, but isn't valid TOML for a [`Config`](crate::Config).
    #[error("couldn't parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The config parsed, but a value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(Cow<'static, str>),
    /// No IO system could be loaded; maps each attempted backend to why it failed.
    #[error("no IO system could be loaded (tried: {})", list_failures(.0))]
    NoIoSystem(Vec<(&'static str, Error)>),
    /// Just directly contains an error message.
    #[error("{0}")]
    Bare(Cow<'static, str>),
}

impl From<&'static str> for Error {
    fn from(value: &'static str) -> Self {
        Self::Bare(Cow::Borrowed(value))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Bare(Cow::Owned(value))
    }
}

fn list_failures(failures: &[(&'static str, Error)]) -> String {
    if failures.is_empty() {
        return "nothing, no backends enabled".into();
    }
    failures
        .iter()
        .map(|(name, e)| format!("{name}: {e}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = core::result::Result<T, Error>;
