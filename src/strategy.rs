//! Interchangeable rule sets behind a single relocation capability.
//!
//! Which one runs is a configuration choice ([`StrategyKind`]); each declares
//! whether it can produce filenames, destinations or both.

mod backup;
mod duplicate;
mod original_name;
mod pipeline;

use tracing::info;

use crate::config::{Settings, StrategyKind};
use crate::destination::RuleChain;
use crate::error::RelocationError;
use crate::filename::{compose_filename, FilenameParts};
use crate::host::PathProbe;
use crate::model::{EpisodeInfo, MediaFile, SeriesInfo, VideoStream};
use crate::orchestrator::{RelocationOutcome, RelocationRequest, RequestMode};

use pipeline::{DestinationStyle, FilenameStyle};

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Standard,
        StrategyKind::DubSubAware,
        StrategyKind::GroupFolder,
        StrategyKind::CopyToBackup,
        StrategyKind::DuplicateFile,
        StrategyKind::OriginalName,
    ];

    /// What this strategy can produce: renames, moves, or both.
    pub fn capabilities(&self) -> RequestMode {
        match self {
            StrategyKind::Standard | StrategyKind::DubSubAware | StrategyKind::GroupFolder => {
                RequestMode::BOTH
            }
            StrategyKind::CopyToBackup | StrategyKind::DuplicateFile => RequestMode::DESTINATION_ONLY,
            StrategyKind::OriginalName => RequestMode::FILENAME_ONLY,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            StrategyKind::Standard => "standard",
            StrategyKind::DubSubAware => "dub-sub-aware",
            StrategyKind::GroupFolder => "group-folder",
            StrategyKind::CopyToBackup => "copy-to-backup",
            StrategyKind::DuplicateFile => "duplicate-file",
            StrategyKind::OriginalName => "original-name",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::Standard => {
                "Release-style names, sorted into folders by restriction and dub/sub languages"
            }
            StrategyKind::DubSubAware => {
                "Names with episode titles, sorted into folders by restriction and dub/sub languages"
            }
            StrategyKind::GroupFolder => {
                "Release-style names, moved to the first drop folder under <group>/<series>"
            }
            StrategyKind::CopyToBackup => {
                "Doesn't rename or move; copies files to a backup folder by group and series"
            }
            StrategyKind::DuplicateFile => "Moves duplicate files to a \"Duplicate Files\" folder",
            StrategyKind::OriginalName => "Renames files to the name they were released under",
        }
    }
}

/// Everything a strategy may look at during one invocation.
pub(crate) struct StrategyContext<'a> {
    pub settings: &'a Settings,
    pub rules: &'a RuleChain,
    pub probe: &'a dyn PathProbe,
    pub request: &'a RelocationRequest<'a>,
    /// Requested mode already narrowed to the strategy's capabilities.
    pub mode: RequestMode,
}

pub(crate) fn run(kind: StrategyKind, ctx: &StrategyContext<'_>) -> RelocationOutcome {
    match kind {
        StrategyKind::Standard => {
            pipeline::relocate(ctx, FilenameStyle::Release, DestinationStyle::LanguageRules)
        }
        StrategyKind::DubSubAware => {
            pipeline::relocate(ctx, FilenameStyle::Titled, DestinationStyle::LanguageRules)
        }
        StrategyKind::GroupFolder => {
            pipeline::relocate(ctx, FilenameStyle::Release, DestinationStyle::GroupFolder)
        }
        StrategyKind::CopyToBackup => backup::relocate(ctx),
        StrategyKind::DuplicateFile => duplicate::relocate(ctx),
        StrategyKind::OriginalName => original_name::relocate(ctx),
    }
}

// Technically a file can link to several series and episodes; the first one decides.

fn first_series<'a>(request: &RelocationRequest<'a>) -> Result<&'a SeriesInfo, RelocationError> {
    request.series.first().ok_or_else(|| {
        RelocationError::missing_association(format!("{} is not linked to a series", request.file.file_name))
    })
}

fn first_episode<'a>(request: &RelocationRequest<'a>) -> Result<&'a EpisodeInfo, RelocationError> {
    request.episodes.first().ok_or_else(|| {
        RelocationError::missing_association(format!("{} is not linked to an episode", request.file.file_name))
    })
}

fn first_group<'a>(request: &RelocationRequest<'a>) -> Result<&'a str, RelocationError> {
    let group = request
        .groups
        .first()
        .map(|g| g.name.trim())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| RelocationError::missing_association("No group name was found"))?;
    info!("GroupName: {}", group);
    Ok(group)
}

/// `[Group] Title - 04 [720p HEVC].mkv` from the file's provider and stream data.
fn release_filename(
    settings: &Settings,
    file: &MediaFile,
    title: &str,
    episode_label: Option<&str>,
) -> Result<String, RelocationError> {
    let video = file.video();
    let resolution = video.and_then(VideoStream::resolution_tag);
    let extension = file.extension();
    let release_group = file.release_group();
    info!("Release Group: {:?}", release_group);

    let parts = FilenameParts {
        release_group,
        title,
        episode_label,
        resolution: resolution.as_deref(),
        codec: video.and_then(VideoStream::codec_tag),
        extension: &extension,
    };
    compose_filename(&parts, settings.effective_prefix())
}
