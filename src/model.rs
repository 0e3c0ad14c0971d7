//! Read-only input records handed to the engine by a host.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Languages that titles, audio tracks and subtitle tracks can carry.
///
/// Parsing accepts English names as well as ISO 639-1/639-2 codes, case
/// insensitively, so `"German"`, `"ger"`, `"deu"` and `"de"` all map to
/// [`Language::German`]. Anything unrecognised becomes [`Language::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    /// Latin transliteration of a Japanese title (`x-jat`).
    Romaji,
    Japanese,
    English,
    German,
    French,
    Spanish,
    Italian,
    Chinese,
    Korean,
    Unknown,
}

impl Language {
    /// Codes a media container or provider may use for this language.
    pub fn codes(&self) -> &'static [&'static str] {
        match self {
            Language::Romaji => &["x-jat"],
            Language::Japanese => &["jpn", "ja"],
            Language::English => &["eng", "en"],
            Language::German => &["ger", "deu", "de"],
            Language::French => &["fre", "fra", "fr"],
            Language::Spanish => &["spa", "es"],
            Language::Italian => &["ita", "it"],
            Language::Chinese => &["chi", "zho", "zh"],
            Language::Korean => &["kor", "ko"],
            Language::Unknown => &[],
        }
    }

    /// Three letter tag used to build folder segments such as `GerDub`.
    pub fn short_tag(&self) -> &'static str {
        match self {
            Language::Romaji => "Rom",
            Language::Japanese => "Jpn",
            Language::English => "Eng",
            Language::German => "Ger",
            Language::French => "Fre",
            Language::Spanish => "Spa",
            Language::Italian => "Ita",
            Language::Chinese => "Chi",
            Language::Korean => "Kor",
            Language::Unknown => "Unk",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Romaji => "romaji",
            Language::Japanese => "japanese",
            Language::English => "english",
            Language::German => "german",
            Language::French => "french",
            Language::Spanish => "spanish",
            Language::Italian => "italian",
            Language::Chinese => "chinese",
            Language::Korean => "korean",
            Language::Unknown => "unknown",
        }
    }

    /// Case-insensitive match of a track language code against this language.
    pub fn matches_code(&self, code: &str) -> bool {
        let code = code.trim();
        self.codes().iter().any(|c| c.eq_ignore_ascii_case(code))
    }

    const KNOWN: [Language; 9] = [
        Language::Romaji,
        Language::Japanese,
        Language::English,
        Language::German,
        Language::French,
        Language::Spanish,
        Language::Italian,
        Language::Chinese,
        Language::Korean,
    ];

    pub fn parse(value: &str) -> Language {
        let value = value.trim();
        Self::KNOWN
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(value) || lang.matches_code(value))
            .unwrap_or(Language::Unknown)
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Language::parse(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    Main,
    Official,
    Short,
    Synonym,
    Card,
    Kana,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub language: Language,
    #[serde(rename = "type", default = "default_title_type")]
    pub kind: TitleType,
    #[serde(rename = "title")]
    pub text: String,
}

fn default_title_type() -> TitleType {
    TitleType::None
}

impl Title {
    pub fn new(language: Language, kind: TitleType, text: impl Into<String>) -> Self {
        Self {
            language,
            kind,
            text: text.into(),
        }
    }
}

/// Episode kinds as a provider reports them.
///
/// [`EpisodeType::Unknown`] is what an unrecognised provider value turns
/// into; the episode formatter refuses it instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EpisodeType {
    Episode,
    Credits,
    Special,
    Trailer,
    Parody,
    Other,
    Unknown,
}

impl EpisodeType {
    /// Label prefix; regular episodes carry none.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            EpisodeType::Episode | EpisodeType::Unknown => None,
            EpisodeType::Credits => Some("C"),
            EpisodeType::Special => Some("S"),
            EpisodeType::Trailer => Some("T"),
            EpisodeType::Parody => Some("P"),
            EpisodeType::Other => Some("O"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EpisodeType::Episode => "episode",
            EpisodeType::Credits => "credits",
            EpisodeType::Special => "special",
            EpisodeType::Trailer => "trailer",
            EpisodeType::Parody => "parody",
            EpisodeType::Other => "other",
            EpisodeType::Unknown => "unknown",
        }
    }
}

impl From<String> for EpisodeType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "episode" | "episodes" | "normal" => EpisodeType::Episode,
            "credits" | "credit" => EpisodeType::Credits,
            "special" | "specials" => EpisodeType::Special,
            "trailer" | "trailers" => EpisodeType::Trailer,
            "parody" | "parodies" => EpisodeType::Parody,
            "other" | "others" => EpisodeType::Other,
            _ => EpisodeType::Unknown,
        }
    }
}

impl From<EpisodeType> for String {
    fn from(value: EpisodeType) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for EpisodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-type episode totals of a series, used for zero-padding.
pub type EpisodeCounts = HashMap<EpisodeType, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Movie,
    #[default]
    TvSeries,
    Ova,
    Web,
    TvSpecial,
    MusicVideo,
    Other,
}

impl ContentType {
    /// Standalone films carry no episode segment in their filename.
    pub fn is_film(&self) -> bool {
        matches!(self, ContentType::Movie)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesInfo {
    pub id: u32,
    pub titles: Vec<Title>,
    /// Provider-chosen default title, the last resort of title resolution.
    pub preferred_title: String,
    pub restricted: bool,
    pub content_type: ContentType,
    pub episode_counts: EpisodeCounts,
}

/// Another file linked to the same episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrossReference {
    pub file_id: Option<u32>,
    pub ed2k: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeInfo {
    #[serde(default)]
    pub id: u32,
    #[serde(rename = "type")]
    pub episode_type: EpisodeType,
    pub number: u32,
    #[serde(default)]
    pub titles: Vec<Title>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
}

/// A user-facing collection a series is sorted into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropFolderType {
    #[default]
    Excluded,
    Source,
    Destination,
    Both,
}

impl DropFolderType {
    pub fn accepts_drops(&self) -> bool {
        matches!(self, DropFolderType::Destination | DropFolderType::Both)
    }
}

/// A managed folder a file may be relocated into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationFolder {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub drop_type: DropFolderType,
}

impl DestinationFolder {
    pub fn new(name: impl Into<String>, location: impl Into<String>, drop_type: DropFolderType) -> Self {
        Self {
            id: 0,
            name: name.into(),
            location: location.into(),
            drop_type,
        }
    }

    pub fn is_drop_destination(&self) -> bool {
        self.drop_type.accepts_drops()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStream {
    /// Standardized resolution tag such as `720p`.
    pub resolution: Option<String>,
    /// Simplified codec tag such as `HEVC`.
    pub codec: Option<String>,
    pub height: Option<u32>,
}

impl VideoStream {
    pub fn resolution_tag(&self) -> Option<String> {
        match self.resolution.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => Some(tag.to_string()),
            _ => self.height.filter(|h| *h > 0).map(|h| format!("{h}p")),
        }
    }

    pub fn codec_tag(&self) -> Option<&str> {
        self.codec.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioTrack {
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextTrack {
    pub language_code: Option<String>,
}

/// Stream metadata read from the container itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaInfo {
    pub video: Option<VideoStream>,
    pub audio: Option<Vec<AudioTrack>>,
    pub subtitles: Option<Vec<TextTrack>>,
}

/// What the metadata provider knows about the release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderFileInfo {
    pub release_group: Option<String>,
    pub original_filename: Option<String>,
    pub audio_languages: Option<Vec<Language>>,
    pub subtitle_languages: Option<Vec<Language>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaFile {
    pub id: u32,
    pub file_name: String,
    /// Absolute path of the file as it currently sits on disk.
    pub path: PathBuf,
    /// Path relative to the managed folder the file currently lives in.
    pub relative_path: PathBuf,
    pub import_folder: Option<DestinationFolder>,
    pub ed2k: Option<String>,
    pub media_info: Option<MediaInfo>,
    pub provider: Option<ProviderFileInfo>,
}

impl MediaFile {
    /// Extension of the current filename including the dot, or empty.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }

    pub fn video(&self) -> Option<&VideoStream> {
        self.media_info.as_ref().and_then(|info| info.video.as_ref())
    }

    pub fn release_group(&self) -> Option<&str> {
        self.provider
            .as_ref()
            .and_then(|p| p.release_group.as_deref())
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    /// Directory part of the relative path, `None` when the file sits at the root.
    pub fn relative_directory(&self) -> Option<String> {
        self.relative_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|p| !p.is_empty())
    }
}
