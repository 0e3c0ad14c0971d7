//! Sequencing of one relocation decision.
//!
//! A [`Relocator`] is built once from [`Settings`] and can then be shared
//! across threads; every call to [`Relocator::relocate`] is an independent,
//! deterministic computation over the request it is given.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{MissingDestinationPolicy, Settings};
use crate::destination::RuleChain;
use crate::error::{ConfigError, RelocationError};
use crate::host::{FsProbe, PathProbe};
use crate::model::{DestinationFolder, EpisodeInfo, GroupInfo, MediaFile, SeriesInfo};
use crate::strategy::{self, StrategyContext};

/// Pipeline states; `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Start,
    TitleResolved,
    EpisodeLabeled,
    Classified,
    DestinationChosen,
    Composed,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Tracks the pipeline state and stamps errors with the stage they hit.
#[derive(Debug)]
pub(crate) struct Progress {
    stage: Stage,
}

impl Progress {
    pub(crate) fn new() -> Self {
        Self { stage: Stage::Start }
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        debug!("Relocation stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    pub(crate) fn fail(&mut self, err: RelocationError) -> RelocationError {
        let err = err.at_stage(self.stage);
        debug!("Relocation stage {} -> Failed: {}", self.stage, err);
        self.stage = Stage::Failed;
        err
    }

    pub(crate) fn check<T>(&mut self, result: Result<T, RelocationError>) -> Result<T, RelocationError> {
        result.map_err(|err| self.fail(err))
    }

    #[cfg(test)]
    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }
}

/// Which parts of a decision the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestMode {
    pub rename: bool,
    pub relocate: bool,
}

impl RequestMode {
    pub const BOTH: RequestMode = RequestMode {
        rename: true,
        relocate: true,
    };
    pub const FILENAME_ONLY: RequestMode = RequestMode {
        rename: true,
        relocate: false,
    };
    pub const DESTINATION_ONLY: RequestMode = RequestMode {
        rename: false,
        relocate: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.rename && !self.relocate
    }

    pub fn intersect(self, other: RequestMode) -> RequestMode {
        RequestMode {
            rename: self.rename && other.rename,
            relocate: self.relocate && other.relocate,
        }
    }
}

/// One invocation: the file, everything linked to it, and the folders it may go to.
#[derive(Debug, Clone, Copy)]
pub struct RelocationRequest<'a> {
    pub file: &'a MediaFile,
    pub series: &'a [SeriesInfo],
    pub episodes: &'a [EpisodeInfo],
    pub groups: &'a [GroupInfo],
    pub available_folders: &'a [DestinationFolder],
    pub mode: RequestMode,
}

/// A successful decision. Omitting both filename and destination means
/// "no change, defer to the next rule".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relocation {
    pub file_name: Option<String>,
    pub destination: Option<DestinationFolder>,
    /// Path below the destination folder.
    pub subfolder: Option<String>,
    /// Where the host should place an additional copy of the file.
    pub backup_copy: Option<PathBuf>,
}

impl Relocation {
    pub fn deferred() -> Self {
        Self::default()
    }

    pub fn is_deferred(&self) -> bool {
        self.file_name.is_none() && self.destination.is_none() && self.backup_copy.is_none()
    }

    fn ensure_complete(&self, mode: RequestMode) -> Result<(), RelocationError> {
        if mode.rename && self.file_name.is_none() {
            return Err(RelocationError::incomplete_metadata("a filename was requested but none was produced"));
        }
        if mode.relocate && self.destination.is_none() {
            return Err(RelocationError::incomplete_metadata(
                "a destination was requested but none was produced",
            ));
        }
        Ok(())
    }
}

pub type RelocationOutcome = Result<Relocation, RelocationError>;

#[derive(Debug)]
pub struct Relocator {
    settings: Settings,
    rules: RuleChain,
    probe: Arc<dyn PathProbe>,
}

impl Relocator {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let rules = RuleChain::from_settings(&settings);
        Ok(Self {
            settings,
            rules,
            probe: Arc::new(FsProbe),
        })
    }

    /// Replaces the probe used to check host preconditions such as the backup root.
    pub fn with_probe(mut self, probe: impl PathProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rules(&self) -> &RuleChain {
        &self.rules
    }

    pub fn relocate(&self, request: &RelocationRequest<'_>) -> RelocationOutcome {
        let kind = self.settings.strategy;
        let mode = request.mode.intersect(kind.capabilities());
        if mode.is_empty() {
            info!(
                "Strategy {} cannot serve {:?} for {}, deferring",
                kind.id(),
                request.mode,
                request.file.file_name
            );
            return Ok(Relocation::deferred());
        }

        let ctx = StrategyContext {
            settings: &self.settings,
            rules: &self.rules,
            probe: self.probe.as_ref(),
            request,
            mode,
        };

        match strategy::run(kind, &ctx) {
            Ok(relocation) if relocation.is_deferred() => {
                info!("No change for {}", request.file.file_name);
                Ok(relocation)
            }
            Ok(relocation) => {
                relocation
                    .ensure_complete(mode)
                    .map_err(|err| err.at_stage(Stage::Done))?;
                info!(
                    "Relocating {} -> name: {:?}, folder: {:?}, subfolder: {:?}",
                    request.file.file_name,
                    relocation.file_name,
                    relocation.destination.as_ref().map(|d| d.location.as_str()),
                    relocation.subfolder
                );
                Ok(relocation)
            }
            Err(err)
                if err.is_recoverable()
                    && self.settings.missing_destination == MissingDestinationPolicy::Defer =>
            {
                warn!("Deferring {}: {}", request.file.file_name, err);
                Ok(Relocation::deferred())
            }
            Err(err) => {
                warn!("Unable to relocate {}: {}", request.file.file_name, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_progress_stamps_failures() {
        let mut progress = Progress::new();
        progress.advance(Stage::TitleResolved);
        let err = progress
            .check::<()>(Err(RelocationError::incomplete_metadata("no codec")))
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::TitleResolved));
        assert_eq!(progress.stage(), Stage::Failed);
    }

    #[test]
    fn test_mode_intersection() {
        assert_eq!(
            RequestMode::BOTH.intersect(RequestMode::DESTINATION_ONLY),
            RequestMode::DESTINATION_ONLY
        );
        assert!(RequestMode::FILENAME_ONLY.intersect(RequestMode::DESTINATION_ONLY).is_empty());
    }

    #[test]
    fn test_deferred_relocation() {
        assert!(Relocation::deferred().is_deferred());
        let named = Relocation {
            file_name: Some("a.mkv".to_string()),
            ..Default::default()
        };
        assert!(!named.is_deferred());
    }

    #[test]
    fn test_requested_piece_missing_is_failure() {
        let named = Relocation {
            file_name: Some("a.mkv".to_string()),
            ..Default::default()
        };
        assert!(named.ensure_complete(RequestMode::FILENAME_ONLY).is_ok());
        let err = named.ensure_complete(RequestMode::BOTH).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteMetadata);
    }

    #[test]
    fn test_relocator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Relocator>();
    }
}
