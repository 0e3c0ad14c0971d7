use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::model::{Language, TitleType};
use crate::sanitize::is_safe_segment;

pub use crate::destination::DestinationRule;

/// Named rule set used to relocate files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Release-style filename and language-aware destination.
    #[default]
    Standard,
    /// `Title - 04 - Episode Title` filenames, language-aware destination.
    DubSubAware,
    /// Release-style filename, first drop folder, `<group>/<series>` subfolder.
    GroupFolder,
    /// Leaves the file in place and asks the host for a backup copy.
    CopyToBackup,
    /// Moves files sharing a hash with another linked file to a duplicates folder.
    DuplicateFile,
    /// Restores the filename the release was published under.
    OriginalName,
}

/// What to do when the computed destination matches no managed folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDestinationPolicy {
    /// Return the "no change" outcome so the host can try another mechanism.
    #[default]
    Defer,
    /// Fail the invocation with `DestinationNotFound`.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePreference {
    #[serde(rename = "type")]
    pub kind: TitleType,
    pub languages: Vec<Language>,
}

impl Default for TitlePreference {
    fn default() -> Self {
        Self {
            kind: TitleType::Main,
            languages: vec![Language::Romaji],
        }
    }
}

/// Destination rule order, either spelled out or as language codes, most
/// wanted first.
///
/// A code list `[a, b, ...]` reads like the built-in order: `a` dub, `a` sub,
/// any of the listed languages, manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguagePriority {
    Rules(Vec<DestinationRule>),
    Codes(Vec<Language>),
}

impl Default for LanguagePriority {
    fn default() -> Self {
        LanguagePriority::Rules(Vec::new())
    }
}

impl LanguagePriority {
    pub fn is_empty(&self) -> bool {
        match self {
            LanguagePriority::Rules(rules) => rules.is_empty(),
            LanguagePriority::Codes(codes) => codes.is_empty(),
        }
    }
}

fn rules_for_languages(languages: &[Language]) -> Vec<DestinationRule> {
    let mut rules = Vec::with_capacity(4);
    if let Some(&first) = languages.first() {
        rules.push(DestinationRule::dub(first));
        rules.push(DestinationRule::sub(first));
        rules.push(DestinationRule::any_language(languages.to_vec()));
    }
    rules.push(DestinationRule::manual());
    rules
}

fn default_library_root() -> String {
    if cfg!(windows) {
        "Z:\\".to_string()
    } else {
        "/mnt/array/".to_string()
    }
}

/// Per-invocation configuration, read-only once handed to a relocator.
///
/// Every field has a default, unknown keys in a settings file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub strategy: StrategyKind,
    pub apply_prefix: bool,
    pub prefix: String,
    pub primary_language: Language,
    pub secondary_language: Language,
    /// Unset means the strategy's own default, see [`Settings::series_title_preference`].
    pub series_title: Option<TitlePreference>,
    pub episode_title_languages: Option<Vec<Language>>,
    /// Ordered destination rules; empty means the built-in ordering.
    pub language_priority: LanguagePriority,
    pub library_root: String,
    pub restricted_segment: String,
    pub unrestricted_segment: String,
    pub require_drop_target: bool,
    pub missing_destination: MissingDestinationPolicy,
    #[serde(alias = "backupRootPath")]
    pub backup_root: Option<String>,
    pub duplicate_folder_name: String,
    pub duplicate_path_marker: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            apply_prefix: false,
            prefix: String::new(),
            primary_language: Language::German,
            secondary_language: Language::English,
            series_title: None,
            episode_title_languages: None,
            language_priority: LanguagePriority::default(),
            library_root: default_library_root(),
            restricted_segment: "Hentai".to_string(),
            unrestricted_segment: "Anime".to_string(),
            require_drop_target: true,
            missing_destination: MissingDestinationPolicy::default(),
            backup_root: None,
            duplicate_folder_name: "Duplicate Files".to_string(),
            duplicate_path_marker: "Duplicate".to_string(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library_root.trim().is_empty() {
            return Err(ConfigError::Invalid("libraryRoot must not be empty".to_string()));
        }
        for (key, segment) in [
            ("restrictedSegment", &self.restricted_segment),
            ("unrestrictedSegment", &self.unrestricted_segment),
        ] {
            if segment.is_empty() || !is_safe_segment(segment) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a single folder name, got {segment:?}"
                )));
            }
        }
        if self.primary_language == Language::Unknown {
            return Err(ConfigError::Invalid("primaryLanguage is not a known language".to_string()));
        }
        Ok(())
    }

    /// The prefix to prepend to filenames, if one is enabled and non-empty.
    pub fn effective_prefix(&self) -> Option<&str> {
        Some(self.prefix.as_str()).filter(|p| self.apply_prefix && !p.is_empty())
    }

    /// Configured rule order, or primary dub, primary sub, other, manual.
    pub fn destination_rules(&self) -> Vec<DestinationRule> {
        match &self.language_priority {
            LanguagePriority::Rules(rules) if !rules.is_empty() => rules.clone(),
            LanguagePriority::Codes(codes) if !codes.is_empty() => rules_for_languages(codes),
            _ => rules_for_languages(&[self.primary_language, self.secondary_language]),
        }
    }

    /// Configured series title preference, or the strategy default: official
    /// titles in the primary, secondary then romaji languages for the dub/sub
    /// aware names, main romaji titles otherwise.
    pub fn series_title_preference(&self) -> TitlePreference {
        if let Some(preference) = &self.series_title {
            return preference.clone();
        }
        match self.strategy {
            StrategyKind::DubSubAware => TitlePreference {
                kind: TitleType::Official,
                languages: self.title_languages(),
            },
            _ => TitlePreference::default(),
        }
    }

    pub fn episode_title_preference(&self) -> Vec<Language> {
        if let Some(languages) = &self.episode_title_languages {
            return languages.clone();
        }
        match self.strategy {
            StrategyKind::DubSubAware => self.title_languages(),
            _ => vec![Language::English, Language::Romaji],
        }
    }

    fn title_languages(&self) -> Vec<Language> {
        let mut languages = Vec::with_capacity(3);
        for language in [self.primary_language, self.secondary_language, Language::Romaji] {
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
        languages
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.apply_prefix = true;
        self.prefix = prefix.into();
        self
    }

    pub fn with_library_root(mut self, root: impl Into<String>) -> Self {
        self.library_root = root.into();
        self
    }

    pub fn with_backup_root(mut self, root: impl Into<String>) -> Self {
        self.backup_root = Some(root.into());
        self
    }

    pub fn with_missing_destination(mut self, policy: MissingDestinationPolicy) -> Self {
        self.missing_destination = policy;
        self
    }
}
