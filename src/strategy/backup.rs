use std::path::Path;
use tracing::info;

use super::{first_group, first_series, StrategyContext};
use crate::error::RelocationError;
use crate::orchestrator::{Progress, Relocation, RelocationOutcome, Stage};
use crate::sanitize::replace_invalid_path_characters;
use crate::title::series_title;

/// Keeps the file where it is and asks for a copy under
/// `<backup root>/<group>/<series>/<file name>`.
pub(crate) fn relocate(ctx: &StrategyContext<'_>) -> RelocationOutcome {
    let mut progress = Progress::new();
    let request = ctx.request;
    let file = request.file;

    let root = progress.check(
        ctx.settings
            .backup_root
            .as_deref()
            .filter(|root| !root.trim().is_empty())
            .ok_or_else(|| RelocationError::precondition_failed("No backup path is configured")),
    )?;
    if !ctx.probe.directory_exists(Path::new(root)) {
        return Err(progress.fail(RelocationError::precondition_failed(format!(
            "Backup path {root} does not exist"
        ))));
    }

    let group = progress.check(first_group(request))?;
    let series = progress.check(first_series(request))?;
    let preference = ctx.settings.series_title_preference();
    let title = progress.check(series_title(series, preference.kind, &preference.languages))?;
    info!("SeriesName: {}", title);
    progress.advance(Stage::TitleResolved);

    let current_folder = progress.check(file.import_folder.clone().ok_or_else(|| {
        RelocationError::incomplete_metadata(format!("{} has no current managed folder", file.file_name))
    }))?;
    let backup_copy = Path::new(root)
        .join(replace_invalid_path_characters(group))
        .join(replace_invalid_path_characters(title))
        .join(&file.file_name);
    info!("Backup copy: {}", backup_copy.display());
    progress.advance(Stage::DestinationChosen);

    progress.advance(Stage::Done);
    Ok(Relocation {
        file_name: None,
        destination: Some(current_folder),
        subfolder: file.relative_directory(),
        backup_copy: Some(backup_copy),
    })
}
