// Integration tests for loading settings and manifests from disk

use std::fs;

use anime_relocator::{
    ConfigError, Language, MissingDestinationPolicy, RelocationManifest, Relocator, RequestMode, Settings,
    StrategyKind,
};
use tempfile::TempDir;

#[test]
fn test_load_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "strategy": "group-folder",
            "primaryLanguage": "eng",
            "missingDestination": "fail",
            "libraryRoot": "/srv/media/"
        }"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.strategy, StrategyKind::GroupFolder);
    assert_eq!(settings.primary_language, Language::English);
    assert_eq!(settings.missing_destination, MissingDestinationPolicy::Fail);
    assert_eq!(settings.library_root, "/srv/media/");
    assert_eq!(settings.restricted_segment, "Hentai");
}

#[test]
fn test_missing_settings_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Settings::load(temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_unknown_primary_language_is_invalid() {
    let err = Settings::from_json(r#"{"primaryLanguage": "klingon"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_manifest_file_drives_relocation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ep4.json");
    fs::write(
        &path,
        r#"{
            "file": {
                "fileName": "ep4.mkv",
                "path": "/downloads/ep4.mkv",
                "mediaInfo": {
                    "video": {"resolution": "1080p", "codec": "AVC"},
                    "audio": [{"languageCode": "jpn"}, {"languageCode": "ger"}]
                },
                "provider": {"releaseGroup": "Grp"}
            },
            "series": [{
                "titles": [{"language": "x-jat", "type": "main", "title": "Example Show"}],
                "episodeCounts": {"episode": 140}
            }],
            "episodes": [{"type": "episode", "number": 5}],
            "availableFolders": [
                {"name": "GerDub", "location": "/mnt/array/Anime/GerDub", "dropType": "destination"}
            ]
        }"#,
    )
    .unwrap();

    let manifest = RelocationManifest::load(&path).unwrap();
    let relocator = Relocator::new(Settings::default().with_library_root("/mnt/array/")).unwrap();
    let relocation = relocator.relocate(&manifest.request(RequestMode::BOTH)).unwrap();

    assert_eq!(
        relocation.file_name.as_deref(),
        Some("[Grp] Example Show - 005 [1080p AVC].mkv")
    );
    assert_eq!(relocation.destination.unwrap().name, "GerDub");
}
