// Shared fixtures for the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use anime_relocator::{
    AudioTrack, CrossReference, DestinationFolder, DropFolderType, EpisodeInfo, EpisodeType, GroupInfo,
    Language, MediaFile, MediaInfo, ProviderFileInfo, RelocationManifest, SeriesInfo, TextTrack, Title,
    TitleType, VideoStream,
};

pub const ROOT: &str = "/mnt/array/";

pub fn folder(name: &str, location: &str) -> DestinationFolder {
    DestinationFolder::new(name, location, DropFolderType::Both)
}

/// The managed folders of a typical library under `/mnt/array/`.
pub fn library_folders() -> Vec<DestinationFolder> {
    let mut folders = Vec::new();
    for tier in ["Anime", "Hentai"] {
        for segment in ["GerDub", "GerSub", "Other", "_manual"] {
            folders.push(folder(
                &format!("{tier} {segment}"),
                &format!("{ROOT}{tier}/{segment}/"),
            ));
        }
    }
    folders
}

pub fn media_file(audio: &[&str], subtitles: &[&str]) -> MediaFile {
    MediaFile {
        id: 1,
        file_name: "ep4.mkv".to_string(),
        path: PathBuf::from("/downloads/ep4.mkv"),
        relative_path: PathBuf::from("ep4.mkv"),
        import_folder: Some(DestinationFolder::new("Downloads", "/downloads/", DropFolderType::Source)),
        ed2k: Some("AABBCCDD".to_string()),
        media_info: Some(MediaInfo {
            video: Some(VideoStream {
                resolution: Some("720p".to_string()),
                codec: Some("HEVC".to_string()),
                height: Some(720),
            }),
            audio: Some(
                audio
                    .iter()
                    .map(|c| AudioTrack {
                        language_code: Some(c.to_string()),
                    })
                    .collect(),
            ),
            subtitles: Some(
                subtitles
                    .iter()
                    .map(|c| TextTrack {
                        language_code: Some(c.to_string()),
                    })
                    .collect(),
            ),
        }),
        provider: Some(ProviderFileInfo {
            release_group: Some("Grp".to_string()),
            original_filename: Some("[Grp] Reisho - 04 (720p).mkv".to_string()),
            ..Default::default()
        }),
    }
}

pub fn series(title: &str, episodes: u32) -> SeriesInfo {
    SeriesInfo {
        id: 42,
        titles: vec![
            Title::new(Language::Romaji, TitleType::Main, title),
            Title::new(Language::English, TitleType::Official, "The Example"),
        ],
        preferred_title: title.to_string(),
        restricted: false,
        content_type: Default::default(),
        episode_counts: HashMap::from([(EpisodeType::Episode, episodes), (EpisodeType::Special, 1)]),
    }
}

pub fn episode(episode_type: EpisodeType, number: u32) -> EpisodeInfo {
    EpisodeInfo {
        id: 400 + number,
        episode_type,
        number,
        titles: vec![
            Title::new(Language::Japanese, TitleType::Main, "再会"),
            Title::new(Language::English, TitleType::Main, "Reunion"),
        ],
        cross_references: vec![CrossReference {
            file_id: Some(1),
            ed2k: Some("AABBCCDD".to_string()),
        }],
    }
}

/// Japanese audio with English subtitles, episode 4 of 12.
pub fn manifest() -> RelocationManifest {
    RelocationManifest {
        file: media_file(&["jpn"], &["eng"]),
        series: vec![series("Example Show", 12)],
        episodes: vec![episode(EpisodeType::Episode, 4)],
        groups: vec![GroupInfo {
            name: "Seasonal".to_string(),
        }],
        available_folders: library_folders(),
    }
}
