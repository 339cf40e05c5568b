use std::fmt::Display;

use miette::Diagnostic;
use thiserror::Error;
use toml::Value;

/// The kind of config file involved in an error: main or overlay.
#[derive(Debug)]
pub enum ConfigKind {
    Main,
    Overlay,
}

impl Display for ConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConfigKind::Main => "main",
            ConfigKind::Overlay => "overlay",
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ErrorKind {
    #[error("found key `{key}` in overlay that does not exist in main config")]
    ExtraKey { key: String, value: Value },
    #[error("type of value differs between main config and overlay for key `{key}`")]
    TypeMismatch {
        key: String,
        main_value: Value,
        overlay_value: Value,
    },
    #[error("failed to load {config_kind} config from `{path}`")]
    ReadIo {
        path: String,
        config_kind: ConfigKind,
        source: std::io::Error,
    },
    #[error("failed to store config at `{path}`")]
    StoreIo {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to serialize toml")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to deserialize toml")]
    Deserialize(#[from] toml::de::Error),
    #[error("invalid subtable `{key}` in overlay")]
    Subtable { key: String, source: Box<ErrorKind> },
    #[error("key `{path}` not found in config and no default was given")]
    MissingKey { path: String },
    #[error("key `{path}` holds a value of the wrong shape for the requested type")]
    WrongShape { path: String },
}

#[derive(Debug, Error, Diagnostic)]
#[error("config `{name}` failed")]
pub struct Error {
    pub name: String,
    #[source]
    pub kind: ErrorKind,
}

impl Error {
    pub fn from_kind<T: crate::Config>(kind: ErrorKind) -> Self {
        Self {
            name: T::name().to_string(),
            kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
