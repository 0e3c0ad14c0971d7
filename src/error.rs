use std::fmt;
use thiserror::Error;

use crate::orchestrator::Stage;

/// Why a relocation could not be decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No series or episode is linked to the file.
    MissingAssociation,
    /// Every title preference missed and the provider default was empty.
    NoUsableTitle,
    /// Episode type outside the known set.
    InvalidEpisodeType,
    /// A required naming input (release group, codec, resolution...) is absent.
    IncompleteMetadata,
    /// No candidate folder matched the computed destination.
    DestinationNotFound,
    /// An environmental precondition, such as the backup root, does not hold.
    PreconditionFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingAssociation => "missing association",
            ErrorKind::NoUsableTitle => "no usable title",
            ErrorKind::InvalidEpisodeType => "invalid episode type",
            ErrorKind::IncompleteMetadata => "incomplete metadata",
            ErrorKind::DestinationNotFound => "destination not found",
            ErrorKind::PreconditionFailed => "precondition failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct RelocationError {
    kind: ErrorKind,
    message: String,
    stage: Option<Stage>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RelocationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stage: None,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Records the pipeline stage the error surfaced in, keeping the first one set.
    pub fn at_stage(mut self, stage: Stage) -> Self {
        self.stage.get_or_insert(stage);
        self
    }

    pub fn missing_association(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingAssociation, message)
    }

    pub fn no_usable_title(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoUsableTitle, message)
    }

    pub fn incomplete_metadata(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompleteMetadata, message)
    }

    pub fn destination_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DestinationNotFound, message)
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PreconditionFailed, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Only a missing destination may be handed to another mechanism by the host.
    pub fn is_recoverable(&self) -> bool {
        self.kind == ErrorKind::DestinationNotFound
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = RelocationError::no_usable_title("series 42 has no titles");
        assert_eq!(err.to_string(), "no usable title: series 42 has no titles");
        assert_eq!(err.kind(), ErrorKind::NoUsableTitle);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_first_stage_wins() {
        let err = RelocationError::destination_not_found("nothing at /mnt/array/Anime/GerDub")
            .at_stage(Stage::Classified)
            .at_stage(Stage::Failed);
        assert_eq!(err.stage(), Some(Stage::Classified));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_source_is_exposed() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = RelocationError::precondition_failed("backup root unavailable").with_source(io);
        assert!(err.source().is_some());
    }
}
