// Integration tests for the individual relocation strategies

mod common;

use std::path::{Path, PathBuf};

use anime_relocator::host::PathProbe;
use anime_relocator::{
    CrossReference, ErrorKind, Language, Relocator, RequestMode, Settings, StrategyKind, Title, TitleType,
};
use common::{folder, manifest, ROOT};

/// Probe that only knows the directories it was given.
#[derive(Debug, Default)]
struct FakeProbe {
    directories: Vec<PathBuf>,
}

impl PathProbe for FakeProbe {
    fn directory_exists(&self, path: &Path) -> bool {
        self.directories.iter().any(|d| d == path)
    }
}

fn relocator(strategy: StrategyKind) -> Relocator {
    Relocator::new(Settings::default().with_library_root(ROOT).with_strategy(strategy)).unwrap()
}

#[test]
fn test_every_strategy_has_an_id() {
    for kind in StrategyKind::ALL {
        assert!(!kind.id().is_empty());
        assert!(!kind.description().is_empty());
        assert!(!kind.capabilities().is_empty());
    }
}

#[test]
fn test_dub_sub_aware_uses_episode_title() {
    let manifest = manifest();
    let relocation = relocator(StrategyKind::DubSubAware)
        .relocate(&manifest.request(RequestMode::BOTH))
        .unwrap();

    // official titles in German, English, then romaji
    assert_eq!(relocation.file_name.as_deref(), Some("The Example - 04 - Reunion.mkv"));
    assert_eq!(relocation.destination.unwrap().location, "/mnt/array/Anime/Other/");
    assert_eq!(relocation.subfolder.as_deref(), Some("The Example"));
}

#[test]
fn test_dub_sub_aware_prefers_primary_language_titles() {
    let mut manifest = manifest();
    manifest.series[0]
        .titles
        .push(Title::new(Language::German, TitleType::Official, "Das Beispiel"));
    manifest.episodes[0]
        .titles
        .push(Title::new(Language::German, TitleType::Main, "Wiedersehen"));

    let relocation = relocator(StrategyKind::DubSubAware)
        .relocate(&manifest.request(RequestMode::FILENAME_ONLY))
        .unwrap();
    assert_eq!(relocation.file_name.as_deref(), Some("Das Beispiel - 04 - Wiedersehen.mkv"));
}

#[test]
fn test_dub_sub_aware_without_episode_titles() {
    let mut manifest = manifest();
    manifest.episodes[0].titles.clear();

    let err = relocator(StrategyKind::DubSubAware)
        .relocate(&manifest.request(RequestMode::FILENAME_ONLY))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoUsableTitle);
}

#[test]
fn test_group_folder_uses_first_drop_folder() {
    let manifest = manifest();
    let relocation = relocator(StrategyKind::GroupFolder)
        .relocate(&manifest.request(RequestMode::BOTH))
        .unwrap();

    assert_eq!(
        relocation.file_name.as_deref(),
        Some("[Grp] Example Show - 04 [720p HEVC].mkv")
    );
    assert_eq!(relocation.destination.unwrap().location, "/mnt/array/Anime/GerDub/");
    let subfolder = PathBuf::from(relocation.subfolder.unwrap());
    assert_eq!(subfolder, Path::new("Seasonal").join("Example Show"));
}

#[test]
fn test_group_folder_needs_a_group() {
    let mut manifest = manifest();
    manifest.groups.clear();

    let err = relocator(StrategyKind::GroupFolder)
        .relocate(&manifest.request(RequestMode::DESTINATION_ONLY))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingAssociation);
}

#[test]
fn test_copy_to_backup_keeps_file_in_place() {
    let manifest = manifest();
    let relocator = Relocator::new(
        Settings::default()
            .with_strategy(StrategyKind::CopyToBackup)
            .with_backup_root("/backup"),
    )
    .unwrap()
    .with_probe(FakeProbe {
        directories: vec![PathBuf::from("/backup")],
    });

    let relocation = relocator.relocate(&manifest.request(RequestMode::BOTH)).unwrap();
    assert!(relocation.file_name.is_none());
    assert_eq!(relocation.destination.unwrap().location, "/downloads/");
    assert_eq!(relocation.subfolder, None);
    assert_eq!(
        relocation.backup_copy,
        Some(Path::new("/backup").join("Seasonal").join("Example Show").join("ep4.mkv"))
    );
}

#[test]
fn test_copy_to_backup_requires_existing_root() {
    let manifest = manifest();
    let relocator = Relocator::new(
        Settings::default()
            .with_strategy(StrategyKind::CopyToBackup)
            .with_backup_root("/backup"),
    )
    .unwrap()
    .with_probe(FakeProbe::default());

    let err = relocator.relocate(&manifest.request(RequestMode::BOTH)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
}

#[test]
fn test_copy_to_backup_requires_configured_root() {
    let manifest = manifest();
    let err = relocator(StrategyKind::CopyToBackup)
        .relocate(&manifest.request(RequestMode::BOTH))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
}

#[test]
fn test_filename_request_to_destination_strategy_defers() {
    let manifest = manifest();
    let relocation = relocator(StrategyKind::CopyToBackup)
        .relocate(&manifest.request(RequestMode::FILENAME_ONLY))
        .unwrap();
    assert!(relocation.is_deferred());
}

fn duplicate_manifest() -> anime_relocator::RelocationManifest {
    let mut manifest = manifest();
    manifest.episodes[0].cross_references.push(CrossReference {
        file_id: Some(2),
        ed2k: Some("aabbccdd".to_string()),
    });
    manifest
        .available_folders
        .push(folder("Duplicate Files", "/mnt/array/Duplicates/"));
    manifest
}

#[test]
fn test_duplicate_goes_to_duplicate_folder() {
    let manifest = duplicate_manifest();
    let relocation = relocator(StrategyKind::DuplicateFile)
        .relocate(&manifest.request(RequestMode::BOTH))
        .unwrap();

    assert_eq!(relocation.destination.unwrap().name, "Duplicate Files");
    assert_eq!(relocation.subfolder.as_deref(), Some("Example Show"));
    assert!(relocation.file_name.is_none());
}

#[test]
fn test_own_cross_reference_is_not_a_duplicate() {
    let mut manifest = manifest();
    manifest
        .available_folders
        .push(folder("Duplicate Files", "/mnt/array/Duplicates/"));

    let relocation = relocator(StrategyKind::DuplicateFile)
        .relocate(&manifest.request(RequestMode::DESTINATION_ONLY))
        .unwrap();
    assert!(relocation.is_deferred());
}

#[test]
fn test_duplicate_folder_found_by_location_marker() {
    let mut manifest = duplicate_manifest();
    manifest.available_folders.pop();
    manifest.available_folders.push(folder("Dupes", "/mnt/array/Duplicate/"));

    let relocation = relocator(StrategyKind::DuplicateFile)
        .relocate(&manifest.request(RequestMode::DESTINATION_ONLY))
        .unwrap();
    assert_eq!(relocation.destination.unwrap().name, "Dupes");
}

#[test]
fn test_duplicate_without_hash_is_incomplete() {
    let mut manifest = duplicate_manifest();
    manifest.file.ed2k = None;

    let err = relocator(StrategyKind::DuplicateFile)
        .relocate(&manifest.request(RequestMode::DESTINATION_ONLY))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompleteMetadata);
}

#[test]
fn test_original_name_restores_release_name() {
    let manifest = manifest();
    let relocation = relocator(StrategyKind::OriginalName)
        .relocate(&manifest.request(RequestMode::BOTH))
        .unwrap();

    assert_eq!(relocation.file_name.as_deref(), Some("[Grp] Reisho - 04 (720p).mkv"));
    assert!(relocation.destination.is_none());
}

#[test]
fn test_original_name_missing() {
    let mut manifest = manifest();
    manifest.file.provider = None;

    let err = relocator(StrategyKind::OriginalName)
        .relocate(&manifest.request(RequestMode::FILENAME_ONLY))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompleteMetadata);
}
