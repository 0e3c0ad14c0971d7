//! Dub/sub coverage of a file, merged from two independent sources: the
//! tracks found in the container and the languages the metadata provider
//! lists for the release. Either source may be missing or incomplete; a
//! missing source simply contributes nothing.

use std::collections::HashMap;

use crate::model::{AudioTrack, Language, MediaFile, TextTrack};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coverage {
    pub has_dub: bool,
    pub has_sub: bool,
}

impl Coverage {
    pub fn any(&self) -> bool {
        self.has_dub || self.has_sub
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageClassification {
    coverage: HashMap<Language, Coverage>,
}

impl LanguageClassification {
    /// Coverage for `language`; languages that were not classified report none.
    pub fn get(&self, language: Language) -> Coverage {
        self.coverage.get(&language).copied().unwrap_or_default()
    }

    pub fn has_dub(&self, language: Language) -> bool {
        self.get(language).has_dub
    }

    pub fn has_sub(&self, language: Language) -> bool {
        self.get(language).has_sub
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Language, &Coverage)> {
        self.coverage.iter()
    }
}

/// The four places language information can come from.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackSources<'a> {
    pub audio: Option<&'a [AudioTrack]>,
    pub subtitles: Option<&'a [TextTrack]>,
    pub provider_audio: Option<&'a [Language]>,
    pub provider_subtitles: Option<&'a [Language]>,
}

impl<'a> TrackSources<'a> {
    pub fn from_file(file: &'a MediaFile) -> Self {
        let media = file.media_info.as_ref();
        let provider = file.provider.as_ref();
        Self {
            audio: media.and_then(|m| m.audio.as_deref()),
            subtitles: media.and_then(|m| m.subtitles.as_deref()),
            provider_audio: provider.and_then(|p| p.audio_languages.as_deref()),
            provider_subtitles: provider.and_then(|p| p.subtitle_languages.as_deref()),
        }
    }
}

fn code_matches(code: Option<&str>, language: Language) -> bool {
    code.is_some_and(|c| language.matches_code(c))
}

/// Classifies each target language independently.
pub fn classify_languages(sources: &TrackSources<'_>, targets: &[Language]) -> LanguageClassification {
    let audio = sources.audio.unwrap_or_default();
    let subtitles = sources.subtitles.unwrap_or_default();
    let provider_audio = sources.provider_audio.unwrap_or_default();
    let provider_subtitles = sources.provider_subtitles.unwrap_or_default();

    let coverage = targets
        .iter()
        .map(|&language| {
            let has_dub = audio
                .iter()
                .any(|t| code_matches(t.language_code.as_deref(), language))
                || provider_audio.contains(&language);
            let has_sub = subtitles
                .iter()
                .any(|t| code_matches(t.language_code.as_deref(), language))
                || provider_subtitles.contains(&language);
            (language, Coverage { has_dub, has_sub })
        })
        .collect();

    LanguageClassification { coverage }
}

pub fn classify_file(file: &MediaFile, targets: &[Language]) -> LanguageClassification {
    classify_languages(&TrackSources::from_file(file), targets)
}
