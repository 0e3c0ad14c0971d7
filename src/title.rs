use crate::error::RelocationError;
use crate::model::{Language, SeriesInfo, Title, TitleType};

/// Picks a title by language preference.
///
/// Preferred languages are tried in order; the first title with that
/// language and the requested type wins. When nothing matches, the provider
/// default `fallback` is used. `None` means there is no usable title at all
/// (no match and an empty fallback).
pub fn resolve_title<'a>(
    titles: &'a [Title],
    kind: TitleType,
    preferred: &[Language],
    fallback: &'a str,
) -> Option<&'a str> {
    preferred
        .iter()
        .find_map(|lang| {
            titles
                .iter()
                .find(|t| t.language == *lang && t.kind == kind && !t.text.trim().is_empty())
        })
        .map(|t| t.text.as_str())
        .or_else(|| Some(fallback).filter(|f| !f.trim().is_empty()))
}

/// Episode titles ignore the title type; without a language match the first
/// listed title is used.
pub fn resolve_episode_title<'a>(titles: &'a [Title], preferred: &[Language]) -> Option<&'a str> {
    preferred
        .iter()
        .find_map(|lang| titles.iter().find(|t| t.language == *lang))
        .or_else(|| titles.first())
        .map(|t| t.text.as_str())
        .filter(|t| !t.trim().is_empty())
}

/// Resolves a series title, failing with `NoUsableTitle` when nothing fits.
pub fn series_title<'a>(
    series: &'a SeriesInfo,
    kind: TitleType,
    preferred: &[Language],
) -> Result<&'a str, RelocationError> {
    resolve_title(&series.titles, kind, preferred, &series.preferred_title).ok_or_else(|| {
        RelocationError::no_usable_title(format!(
            "series {} has no {:?} title in {:?} and no preferred title",
            series.id, kind, preferred
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles() -> Vec<Title> {
        vec![
            Title::new(Language::Japanese, TitleType::Official, "進撃の巨人"),
            Title::new(Language::English, TitleType::Official, "Attack on Titan"),
            Title::new(Language::Romaji, TitleType::Main, "Shingeki no Kyojin"),
            Title::new(Language::German, TitleType::Synonym, "Angriff der Titanen"),
            Title::new(Language::English, TitleType::Short, "AoT"),
        ]
    }

    #[test]
    fn test_first_preferred_language_wins() {
        let titles = titles();
        let picked = resolve_title(
            &titles,
            TitleType::Official,
            &[Language::German, Language::English, Language::Romaji],
            "fallback",
        );
        // the German title is a synonym, so English is the first official match
        assert_eq!(picked, Some("Attack on Titan"));
    }

    #[test]
    fn test_type_must_match() {
        let titles = titles();
        assert_eq!(
            resolve_title(&titles, TitleType::Main, &[Language::English, Language::Romaji], "x"),
            Some("Shingeki no Kyojin")
        );
    }

    #[test]
    fn test_falls_back_to_provider_default() {
        let titles = titles();
        assert_eq!(
            resolve_title(&titles, TitleType::Card, &[Language::English], "Preferred"),
            Some("Preferred")
        );
        assert_eq!(resolve_title(&[], TitleType::Main, &[Language::Romaji], "Preferred"), Some("Preferred"));
    }

    #[test]
    fn test_empty_fallback_is_no_title() {
        assert_eq!(resolve_title(&[], TitleType::Main, &[Language::Romaji], ""), None);
        assert_eq!(resolve_title(&[], TitleType::Main, &[], "   "), None);
    }

    #[test]
    fn test_series_title_error_kind() {
        let series = SeriesInfo::default();
        let err = series_title(&series, TitleType::Main, &[Language::Romaji]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NoUsableTitle);
    }

    #[test]
    fn test_episode_title_preference_and_fallback() {
        let titles = vec![
            Title::new(Language::Japanese, TitleType::None, "第1話"),
            Title::new(Language::English, TitleType::None, "To You, in 2000 Years"),
        ];
        assert_eq!(
            resolve_episode_title(&titles, &[Language::German, Language::English]),
            Some("To You, in 2000 Years")
        );
        assert_eq!(resolve_episode_title(&titles, &[Language::German]), Some("第1話"));
        assert_eq!(resolve_episode_title(&[], &[Language::English]), None);
    }
}
