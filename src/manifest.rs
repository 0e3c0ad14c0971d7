use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::model::{DestinationFolder, EpisodeInfo, GroupInfo, MediaFile, SeriesInfo};
use crate::orchestrator::{RelocationRequest, RequestMode};

/// Owned description of one invocation, as a host would write it to JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelocationManifest {
    pub file: MediaFile,
    pub series: Vec<SeriesInfo>,
    pub episodes: Vec<EpisodeInfo>,
    pub groups: Vec<GroupInfo>,
    pub available_folders: Vec<DestinationFolder>,
}

impl RelocationManifest {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn request(&self, mode: RequestMode) -> RelocationRequest<'_> {
        RelocationRequest {
            file: &self.file,
            series: &self.series,
            episodes: &self.episodes,
            groups: &self.groups,
            available_folders: &self.available_folders,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EpisodeType, Language};

    #[test]
    fn test_manifest_parses_host_json() {
        let manifest = RelocationManifest::from_json(
            r#"{
                "file": {
                    "fileName": "ep4.mkv",
                    "path": "/downloads/ep4.mkv",
                    "mediaInfo": {"video": {"resolution": "720p", "codec": "HEVC"}, "audio": [{"languageCode": "jpn"}]},
                    "provider": {"releaseGroup": "Grp", "subtitleLanguages": ["eng"]}
                },
                "series": [{"titles": [{"language": "x-jat", "type": "main", "title": "Example Show"}],
                            "episodeCounts": {"episode": 12}}],
                "episodes": [{"type": "episode", "number": 4}]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.series[0].titles[0].language, Language::Romaji);
        assert_eq!(manifest.episodes[0].episode_type, EpisodeType::Episode);
        assert_eq!(manifest.file.release_group(), Some("Grp"));
        assert!(manifest.available_folders.is_empty());

        let request = manifest.request(RequestMode::FILENAME_ONLY);
        assert_eq!(request.file.file_name, "ep4.mkv");
    }
}
