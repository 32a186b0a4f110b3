use thiserror::Error;

#[derive(Error, Debug)]
/// Everything the CLI can fail with; `main` prints it and exits 1.
pub enum CliError {
    #[error("{0}")]
    /// Plain user-facing message.
    Message(String),

    #[error("input not found: {0}")]
    /// Input path does not exist or is not a file.
    InputNotFound(String),

    #[error("invalid glob pattern: {0}")]
    /// Malformed glob pattern.
    InvalidGlob(String),

    #[error("glob error: {0}")]
    /// Glob matched an unreadable path.
    Glob(String),

    #[error("output exists: {0} (use --overwrite)")]
    /// Refused to replace an existing output file.
    OutputExists(String),

    #[error("{file}: {source}")]
    /// Container failed to decode.
    Decode {
        file: String,
        source: ncmkit::Error,
    },

    #[error("{failed} of {total} files failed")]
    /// Some files in a batch failed; each was already reported.
    BatchFailed {
        failed: usize,
        total: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    /// Settings file did not parse.
    Toml(#[from] toml::de::Error),

    #[error("tag write failed: {0}")]
    /// ID3 tag could not be written into the recovered stream.
    Tag(#[from] id3::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Message shown after `ERROR:`; decode failures carry the error name.
    pub fn user_message(&self) -> String {
        match self {
            Self::Message(msg) => msg.clone(),
            Self::Decode { file, source } => format!("{file}: {} ({source})", source.name()),
            Self::Toml(err) => format!("invalid settings file: {err}"),
            other => other.to_string(),
        }
    }

    /// Short error kind for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode { source, .. } => source.name(),
            Self::InputNotFound(_) => "InputNotFound",
            Self::OutputExists(_) => "OutputExists",
            Self::Io(_) => "Io",
            Self::Tag(_) => "Tag",
            _ => "Error",
        }
    }
}
