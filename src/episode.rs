use crate::error::{ErrorKind, RelocationError};
use crate::model::{EpisodeCounts, EpisodeType};

const DEFAULT_WIDTH: usize = 2;

/// Number of digits used to pad episode numbers of a type with `total` entries.
fn pad_width(total: Option<u32>) -> usize {
    match total {
        Some(total) if total > 0 => total.ilog10() as usize + 1,
        _ => DEFAULT_WIDTH,
    }
}

/// Builds an episode label such as `04`, `S05` or `C03`.
///
/// The index is zero-padded to the digit count of the series' total for that
/// episode type (two digits when the total is unknown) and prefixed with the
/// type letter. Indices wider than the total are kept as they are.
pub fn format_episode_number(
    index: u32,
    kind: EpisodeType,
    totals: &EpisodeCounts,
) -> Result<String, RelocationError> {
    if kind == EpisodeType::Unknown {
        return Err(RelocationError::new(
            ErrorKind::InvalidEpisodeType,
            format!("episode {index} has an unrecognised type"),
        ));
    }
    if index == 0 {
        return Err(RelocationError::incomplete_metadata(format!(
            "{kind} has no episode number"
        )));
    }

    let width = pad_width(totals.get(&kind).copied());
    let prefix = kind.prefix().unwrap_or_default();
    Ok(format!("{prefix}{index:0width$}"))
}
