use tracing::info;

use super::StrategyContext;
use crate::error::RelocationError;
use crate::orchestrator::{Progress, Relocation, RelocationOutcome, Stage};
use crate::sanitize::replace_invalid_path_characters;

/// Renames a file back to the name the provider lists for the release.
pub(crate) fn relocate(ctx: &StrategyContext<'_>) -> RelocationOutcome {
    let mut progress = Progress::new();
    let file = ctx.request.file;

    let original = progress.check(
        file.provider
            .as_ref()
            .and_then(|p| p.original_filename.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RelocationError::incomplete_metadata("No original filename was found")),
    )?;
    info!("Original filename: {}", original);
    progress.advance(Stage::Composed);

    progress.advance(Stage::Done);
    Ok(Relocation {
        file_name: Some(replace_invalid_path_characters(original)),
        ..Relocation::default()
    })
}
