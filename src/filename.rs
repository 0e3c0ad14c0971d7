use crate::error::RelocationError;
use crate::sanitize::replace_invalid_path_characters;

/// Inputs of a release-style filename.
///
/// `episode_label` is `None` only for standalone films, which carry no
/// episode segment; an empty label is treated as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameParts<'a> {
    pub release_group: Option<&'a str>,
    pub title: &'a str,
    pub episode_label: Option<&'a str>,
    pub resolution: Option<&'a str>,
    pub codec: Option<&'a str>,
    /// Extension including the leading dot, may be empty.
    pub extension: &'a str,
}

fn required<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str, RelocationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelocationError::incomplete_metadata(format!("no {what} available for the filename")))
}

fn finish(name: String, prefix: Option<&str>) -> String {
    let name = match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{prefix}{name}"),
        None => name,
    };
    replace_invalid_path_characters(&name)
}

/// Builds `[Group] Title - 04 [720p HEVC].mkv`.
pub fn compose_filename(parts: &FilenameParts<'_>, prefix: Option<&str>) -> Result<String, RelocationError> {
    let group = required(parts.release_group, "release group")?;
    let title = required(Some(parts.title), "title")?;
    let resolution = required(parts.resolution, "resolution")?;
    let codec = required(parts.codec, "codec")?;

    let name = match parts.episode_label {
        Some(label) => {
            let label = required(Some(label), "episode label")?;
            format!("[{group}] {title} - {label} [{resolution} {codec}]{}", parts.extension)
        }
        None => format!("[{group}] {title} [{resolution} {codec}]{}", parts.extension),
    };

    Ok(finish(name, prefix))
}

/// Builds `Title - 04 - Episode Title.mkv`, or `Title - Episode Title.mkv` for films.
pub fn compose_titled_filename(
    title: &str,
    episode_label: Option<&str>,
    episode_title: &str,
    extension: &str,
    prefix: Option<&str>,
) -> Result<String, RelocationError> {
    let title = required(Some(title), "title")?;
    let episode_title = required(Some(episode_title), "episode title")?;

    let name = match episode_label {
        Some(label) => {
            let label = required(Some(label), "episode label")?;
            format!("{title} - {label} - {episode_title}{extension}")
        }
        None => format!("{title} - {episode_title}{extension}"),
    };

    Ok(finish(name, prefix))
}
