use std::path::Path;
use tracing::info;

use super::{first_episode, first_group, first_series, release_filename, StrategyContext};
use crate::destination::{DestinationLayout, DestinationSelector};
use crate::episode::format_episode_number;
use crate::error::RelocationError;
use crate::filename::compose_titled_filename;
use crate::language::classify_file;
use crate::orchestrator::{Progress, Relocation, RelocationOutcome, Stage};
use crate::sanitize::replace_invalid_path_characters;
use crate::title::{resolve_episode_title, series_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilenameStyle {
    /// `[Group] Title - 04 [720p HEVC].mkv`
    Release,
    /// `Title - 04 - Episode Title.mkv`
    Titled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DestinationStyle {
    /// Restriction tier + dub/sub rule chain, subfolder named after the series.
    LanguageRules,
    /// First drop folder, `<group>/<series>` subfolder.
    GroupFolder,
}

pub(crate) fn relocate(
    ctx: &StrategyContext<'_>,
    filename_style: FilenameStyle,
    destination_style: DestinationStyle,
) -> RelocationOutcome {
    let mut progress = Progress::new();
    let request = ctx.request;
    let file = request.file;
    let settings = ctx.settings;

    let series = progress.check(first_series(request))?;
    let episode = progress.check(first_episode(request))?;

    let preference = settings.series_title_preference();
    let title = progress.check(series_title(series, preference.kind, &preference.languages))?;
    info!("SeriesName: {}", title);
    progress.advance(Stage::TitleResolved);

    // only filenames carry the label; films never do
    let episode_label = if series.content_type.is_film() || !ctx.mode.rename {
        None
    } else {
        let label = progress.check(format_episode_number(
            episode.number,
            episode.episode_type,
            &series.episode_counts,
        ))?;
        info!("Padded Episode Number: {}", label);
        Some(label)
    };
    progress.advance(Stage::EpisodeLabeled);

    let mut relocation = Relocation::default();

    if ctx.mode.relocate {
        match destination_style {
            DestinationStyle::LanguageRules => {
                let classification = classify_file(file, &ctx.rules.target_languages());
                progress.advance(Stage::Classified);

                let selector = DestinationSelector {
                    chain: ctx.rules,
                    layout: DestinationLayout::from_settings(settings),
                    require_drop_target: settings.require_drop_target,
                };
                let choice =
                    progress.check(selector.select(&classification, series.restricted, request.available_folders))?;
                info!("Destination: {} via {}", choice.location, choice.rule.segment());

                relocation.destination = Some(choice.folder.clone());
                relocation.subfolder = Some(replace_invalid_path_characters(title));
            }
            DestinationStyle::GroupFolder => {
                let group = progress.check(first_group(request))?;
                let folder = progress.check(
                    request
                        .available_folders
                        .iter()
                        .find(|f| f.is_drop_destination())
                        .ok_or_else(|| RelocationError::destination_not_found("No drop destination folder is available")),
                )?;

                let subfolder = Path::new(&replace_invalid_path_characters(group))
                    .join(replace_invalid_path_characters(title))
                    .to_string_lossy()
                    .to_string();
                relocation.destination = Some(folder.clone());
                relocation.subfolder = Some(subfolder);
            }
        }
        progress.advance(Stage::DestinationChosen);
    }

    if ctx.mode.rename {
        let name = match filename_style {
            FilenameStyle::Release => release_filename(settings, file, title, episode_label.as_deref()),
            FilenameStyle::Titled => resolve_episode_title(&episode.titles, &settings.episode_title_preference())
                .ok_or_else(|| {
                    RelocationError::no_usable_title(format!("episode {} has no title", episode.number))
                })
                .and_then(|episode_title| {
                    compose_titled_filename(
                        title,
                        episode_label.as_deref(),
                        episode_title,
                        &file.extension(),
                        settings.effective_prefix(),
                    )
                }),
        };
        relocation.file_name = Some(progress.check(name)?);
        progress.advance(Stage::Composed);
    }

    progress.advance(Stage::Done);
    Ok(relocation)
}
