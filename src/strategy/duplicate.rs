use tracing::{debug, info};

use super::StrategyContext;
use crate::error::RelocationError;
use crate::orchestrator::{Progress, Relocation, RelocationOutcome, Stage};
use crate::sanitize::replace_invalid_path_characters;

/// Moves a file into the duplicates folder when another file linked to one
/// of its episodes carries the same ED2K hash. Anything else is left alone.
pub(crate) fn relocate(ctx: &StrategyContext<'_>) -> RelocationOutcome {
    let mut progress = Progress::new();
    let request = ctx.request;
    let file = request.file;
    let settings = ctx.settings;

    if request.episodes.is_empty() {
        return Err(progress.fail(RelocationError::missing_association(format!(
            "{} is not linked to an episode",
            file.file_name
        ))));
    }
    let hash = progress.check(
        file.ed2k
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| RelocationError::incomplete_metadata(format!("{} has no ED2K hash", file.file_name))),
    )?;

    let is_duplicate = request
        .episodes
        .iter()
        .flat_map(|episode| &episode.cross_references)
        .filter(|xref| xref.file_id != Some(file.id))
        .any(|xref| xref.ed2k.as_deref().is_some_and(|other| other.trim().eq_ignore_ascii_case(hash)));
    progress.advance(Stage::Classified);

    if !is_duplicate {
        debug!("{} is not a duplicate", file.file_name);
        return Ok(Relocation::deferred());
    }

    let marker = settings.duplicate_path_marker.as_str();
    let folder = progress.check(
        request
            .available_folders
            .iter()
            .find(|f| f.name == settings.duplicate_folder_name || (!marker.is_empty() && f.location.contains(marker)))
            .ok_or_else(|| RelocationError::destination_not_found("Unable to get managed folder for duplicate files")),
    )?;
    info!("Duplicate {} goes to {}", file.file_name, folder.location);
    progress.advance(Stage::DestinationChosen);

    let subfolder = request
        .series
        .first()
        .map(|s| s.preferred_title.trim())
        .filter(|t| !t.is_empty())
        .map(replace_invalid_path_characters);

    progress.advance(Stage::Done);
    Ok(Relocation {
        destination: Some(folder.clone()),
        subfolder,
        ..Relocation::default()
    })
}
