use std::path::PathBuf;

use anime_relocator::{MediaFile, Relocation};

#[derive(Debug, Clone)]
pub struct ReviewItem {
    pub source: PathBuf,
    pub file: Option<MediaFile>,
    pub original_name: String,
    pub relocation: Option<Relocation>,
    pub target: Option<PathBuf>,
    pub status: ReviewStatus,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Ready,
    Deferred,
    Failed,
    Applied,
    ApplyFailed,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReviewStats {
    pub total: usize,
    pub ready: usize,
    pub deferred: usize,
    pub failed: usize,
    pub applied: usize,
}
