//! Relocation decision engine for anime media files.
//!
//! Given a file, the series and episodes it is linked to and the managed
//! folders a host knows about, the engine decides a normalized filename and
//! a destination folder + subfolder. It never touches the disk itself: the
//! [`host`] module holds the small amount of I/O a host needs to act on a
//! decision.
//!
//! The pieces, leaves first:
//! - [`title`] picks a display title from ranked language preferences
//! - [`episode`] builds zero-padded, type-prefixed episode labels
//! - [`language`] classifies dub/sub coverage from tracks and provider data
//! - [`destination`] maps that classification onto a candidate folder
//! - [`filename`] assembles the final filename
//! - [`orchestrator`] sequences everything through a [`strategy`]

pub mod config;
pub mod destination;
pub mod episode;
pub mod error;
pub mod filename;
pub mod host;
pub mod language;
pub mod manifest;
pub mod model;
pub mod orchestrator;
pub mod sanitize;
pub mod strategy;
pub mod title;

pub use config::{DestinationRule, LanguagePriority, MissingDestinationPolicy, Settings, StrategyKind};
pub use error::{ConfigError, ErrorKind, RelocationError};
pub use manifest::RelocationManifest;
pub use model::{
    AudioTrack, ContentType, CrossReference, DestinationFolder, DropFolderType, EpisodeCounts,
    EpisodeInfo, EpisodeType, GroupInfo, Language, MediaFile, MediaInfo, ProviderFileInfo,
    SeriesInfo, TextTrack, Title, TitleType, VideoStream,
};
pub use orchestrator::{
    Relocation, RelocationOutcome, RelocationRequest, Relocator, RequestMode, Stage,
};
