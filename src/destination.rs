//! Destination selection: an ordered rule chain turns a language
//! classification into a folder path, which is then looked up among the
//! managed folders the host supplied.
//!
//! Target paths look like `<root><tier>/<segment>/`, e.g.
//! `/mnt/array/Anime/GerDub/`, where the tier depends on the series'
//! restriction flag and the segment on the first satisfied rule.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::RelocationError;
use crate::language::LanguageClassification;
use crate::model::{DestinationFolder, Language};

fn default_other_segment() -> String {
    "Other".to_string()
}

fn default_manual_segment() -> String {
    "_manual".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum DestinationRule {
    /// An audio track in `language` is present.
    Dub {
        language: Language,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        segment: Option<String>,
    },
    /// A subtitle track in `language` is present.
    Sub {
        language: Language,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        segment: Option<String>,
    },
    /// Any dub or sub in one of `languages` is present.
    AnyLanguage {
        languages: Vec<Language>,
        #[serde(default = "default_other_segment")]
        segment: String,
    },
    /// Always matches; files land here for manual review.
    Manual {
        #[serde(default = "default_manual_segment")]
        segment: String,
    },
}

impl DestinationRule {
    pub fn dub(language: Language) -> Self {
        DestinationRule::Dub { language, segment: None }
    }

    pub fn sub(language: Language) -> Self {
        DestinationRule::Sub { language, segment: None }
    }

    pub fn any_language(languages: Vec<Language>) -> Self {
        DestinationRule::AnyLanguage {
            languages,
            segment: default_other_segment(),
        }
    }

    pub fn manual() -> Self {
        DestinationRule::Manual {
            segment: default_manual_segment(),
        }
    }

    /// Folder segment this rule routes to, `GerDub` style unless overridden.
    pub fn segment(&self) -> String {
        match self {
            DestinationRule::Dub { language, segment } => segment
                .clone()
                .unwrap_or_else(|| format!("{}Dub", language.short_tag())),
            DestinationRule::Sub { language, segment } => segment
                .clone()
                .unwrap_or_else(|| format!("{}Sub", language.short_tag())),
            DestinationRule::AnyLanguage { segment, .. } | DestinationRule::Manual { segment } => {
                segment.clone()
            }
        }
    }

    pub fn is_satisfied(&self, classification: &LanguageClassification) -> bool {
        match self {
            DestinationRule::Dub { language, .. } => classification.has_dub(*language),
            DestinationRule::Sub { language, .. } => classification.has_sub(*language),
            DestinationRule::AnyLanguage { languages, .. } => {
                languages.iter().any(|lang| classification.get(*lang).any())
            }
            DestinationRule::Manual { .. } => true,
        }
    }

    pub fn languages(&self) -> &[Language] {
        match self {
            DestinationRule::Dub { language, .. } | DestinationRule::Sub { language, .. } => {
                std::slice::from_ref(language)
            }
            DestinationRule::AnyLanguage { languages, .. } => languages,
            DestinationRule::Manual { .. } => &[],
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, DestinationRule::Manual { .. })
    }
}

/// Ordered rules that always end in a manual-review rule, so selection
/// never falls through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleChain {
    rules: Vec<DestinationRule>,
    fallback: DestinationRule,
}

impl RuleChain {
    /// Rules after the first manual rule can never fire and are dropped;
    /// a chain without one gets the default manual rule appended.
    pub fn new(rules: Vec<DestinationRule>) -> Self {
        let mut ordered = Vec::new();
        let mut fallback = None;
        let mut rules = rules.into_iter();
        for rule in rules.by_ref() {
            if rule.is_manual() {
                fallback = Some(rule);
                break;
            }
            ordered.push(rule);
        }

        let unreachable = rules.count();
        if unreachable > 0 {
            warn!("Ignoring {} destination rule(s) listed after the manual rule", unreachable);
        }

        Self {
            rules: ordered,
            fallback: fallback.unwrap_or_else(DestinationRule::manual),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.destination_rules())
    }

    /// First satisfied rule, or the manual fallback.
    pub fn select(&self, classification: &LanguageClassification) -> &DestinationRule {
        self.rules
            .iter()
            .find(|rule| rule.is_satisfied(classification))
            .unwrap_or(&self.fallback)
    }

    /// Every language some rule looks at, in rule order without repeats.
    pub fn target_languages(&self) -> Vec<Language> {
        let mut languages = Vec::new();
        for lang in self.iter().flat_map(|rule| rule.languages()) {
            if !languages.contains(lang) {
                languages.push(*lang);
            }
        }
        languages
    }

    pub fn iter(&self) -> impl Iterator<Item = &DestinationRule> {
        self.rules.iter().chain(std::iter::once(&self.fallback))
    }
}

/// How target locations are spelled out.
#[derive(Debug, Clone, Copy)]
pub struct DestinationLayout<'a> {
    pub root: &'a str,
    pub restricted_segment: &'a str,
    pub unrestricted_segment: &'a str,
}

impl<'a> DestinationLayout<'a> {
    pub fn from_settings(settings: &'a Settings) -> Self {
        Self {
            root: &settings.library_root,
            restricted_segment: &settings.restricted_segment,
            unrestricted_segment: &settings.unrestricted_segment,
        }
    }

    fn separator(&self) -> char {
        if self.root.contains('\\') && !self.root.contains('/') {
            '\\'
        } else {
            '/'
        }
    }

    /// Location a rule routes to, with a trailing separator.
    pub fn location_for(&self, restricted: bool, rule: &DestinationRule) -> String {
        let sep = self.separator();
        let tier = if restricted {
            self.restricted_segment
        } else {
            self.unrestricted_segment
        };
        format!("{}{sep}{tier}{sep}{}{sep}", normalize_location(self.root), rule.segment())
    }
}

/// Strips trailing separators so `/a/b/` and `/a/b` compare equal.
pub fn normalize_location(location: &str) -> &str {
    location.trim_end_matches(['/', '\\'])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationChoice<'a> {
    pub folder: &'a DestinationFolder,
    pub location: String,
    pub rule: DestinationRule,
}

#[derive(Debug, Clone)]
pub struct DestinationSelector<'a> {
    pub chain: &'a RuleChain,
    pub layout: DestinationLayout<'a>,
    /// Only folders accepting dropped files are eligible.
    pub require_drop_target: bool,
}

impl<'a> DestinationSelector<'a> {
    pub fn select<'f>(
        &self,
        classification: &LanguageClassification,
        restricted: bool,
        candidates: &'f [DestinationFolder],
    ) -> Result<DestinationChoice<'f>, RelocationError> {
        let rule = self.chain.select(classification);
        let location = self.layout.location_for(restricted, rule);
        debug!("Destination rule {:?} routes to {}", rule, location);

        let wanted = normalize_location(&location);
        let folder = candidates
            .iter()
            .filter(|f| !self.require_drop_target || f.is_drop_destination())
            .find(|f| normalize_location(&f.location) == wanted)
            .ok_or_else(|| {
                RelocationError::destination_not_found(format!(
                    "no managed folder at {location} (rule {})",
                    rule.segment()
                ))
            })?;

        Ok(DestinationChoice {
            folder,
            location,
            rule: rule.clone(),
        })
    }
}
