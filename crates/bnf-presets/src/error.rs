use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("unknown codelist preset '{name}' (available: {available})")]
    UnknownPreset { name: String, available: String },

    #[error("failed to parse codelist preset {name}: {source}")]
    Csv {
        name: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, PresetError>;
