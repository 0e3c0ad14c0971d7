use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::warn;

use anime_relocator::{MediaFile, Relocation, RelocationManifest, Relocator, RequestMode};

/// The engine's answer for one manifest.
#[derive(Debug)]
pub struct Decision {
    pub source: PathBuf,
    pub file: Option<MediaFile>,
    pub outcome: Result<Relocation, String>,
}

impl Decision {
    fn failed(source: PathBuf, message: String) -> Self {
        Self {
            source,
            file: None,
            outcome: Err(message),
        }
    }

    pub fn display_name(&self) -> String {
        match &self.file {
            Some(file) if !file.file_name.is_empty() => file.file_name.clone(),
            _ => self.source.display().to_string(),
        }
    }
}

async fn decide(relocator: Arc<Relocator>, source: PathBuf, mode: RequestMode) -> Decision {
    let content = match tokio::fs::read_to_string(&source).await {
        Ok(content) => content,
        Err(e) => return Decision::failed(source, format!("Failed to read manifest: {e}")),
    };
    let manifest = match RelocationManifest::from_json(&content) {
        Ok(manifest) => manifest,
        Err(e) => return Decision::failed(source, e.to_string()),
    };

    // the engine is CPU only, keep it off the async workers
    let decided = tokio::task::spawn_blocking(move || {
        let outcome = relocator
            .relocate(&manifest.request(mode))
            .map_err(|e| e.to_string());
        (manifest.file, outcome)
    })
    .await;

    match decided {
        Ok((file, outcome)) => Decision {
            source,
            file: Some(file),
            outcome,
        },
        Err(e) => Decision::failed(source, format!("Relocation task failed: {e}")),
    }
}

/// Evaluates every manifest concurrently against one shared relocator,
/// returning decisions in input order.
pub async fn decide_all(relocator: Arc<Relocator>, sources: &[PathBuf], mode: RequestMode) -> Vec<Decision> {
    let mut set = JoinSet::new();
    for (index, source) in sources.iter().cloned().enumerate() {
        let relocator = Arc::clone(&relocator);
        set.spawn(async move { (index, decide(relocator, source, mode).await) });
    }

    let mut slots: Vec<Option<Decision>> = sources.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, decision)) => {
                if let Some(slot) = slots.get_mut(index) {
                    *slot = Some(decision);
                }
            }
            Err(e) => warn!("Manifest task failed: {}", e),
        }
    }
    slots.into_iter().flatten().collect()
}
