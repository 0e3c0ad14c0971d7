//! Host-side glue: the probe strategies use to check preconditions, and the
//! step that carries out a decided relocation on disk.
//!
//! Nothing in the decision engine writes to the file system; only
//! [`apply_relocation`] does, and only when a host calls it.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::model::MediaFile;
use crate::orchestrator::Relocation;

/// Read-only view of the file system for precondition checks.
pub trait PathProbe: Send + Sync + fmt::Debug {
    fn directory_exists(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyResult {
    /// The file (or its backup copy) now lives at this path.
    Success(PathBuf),
    Unchanged,
    AlreadyExists,
    NoPermission,
    SourceNotFound,
    OtherError(String),
}

impl ApplyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ApplyResult::Success(_) | ApplyResult::Unchanged)
    }
}

impl fmt::Display for ApplyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyResult::Success(path) => write!(f, "moved to {}", path.display()),
            ApplyResult::Unchanged => f.write_str("no change needed"),
            ApplyResult::AlreadyExists => f.write_str("target already exists"),
            ApplyResult::NoPermission => f.write_str("no permission"),
            ApplyResult::SourceNotFound => f.write_str("source file not found"),
            ApplyResult::OtherError(msg) => f.write_str(msg),
        }
    }
}

/// Full path the file ends up at, or `None` for a deferred decision.
pub fn target_path(file: &MediaFile, relocation: &Relocation) -> Option<PathBuf> {
    if relocation.file_name.is_none() && relocation.destination.is_none() {
        return None;
    }

    let directory = match &relocation.destination {
        Some(folder) => {
            let base = PathBuf::from(&folder.location);
            match &relocation.subfolder {
                Some(sub) => base.join(sub),
                None => base,
            }
        }
        None => file.path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let name = relocation.file_name.as_deref().unwrap_or(&file.file_name);
    Some(directory.join(name))
}

fn classify_io_error(err: &io::Error) -> ApplyResult {
    match err.kind() {
        io::ErrorKind::PermissionDenied => ApplyResult::NoPermission,
        io::ErrorKind::NotFound => ApplyResult::SourceNotFound,
        io::ErrorKind::AlreadyExists => ApplyResult::AlreadyExists,
        _ => ApplyResult::OtherError(err.to_string()),
    }
}

fn create_parent(target: &Path) -> io::Result<()> {
    match target.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Copies into a file that must not exist yet; the check and the create are
/// one step, so a concurrent writer makes this fail instead of being clobbered.
fn copy_new(source: &Path, target: &Path) -> io::Result<()> {
    create_parent(target)?;
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(target)?;
    if let Err(err) = io::copy(&mut reader, &mut writer) {
        drop(writer);
        let _ = fs::remove_file(target);
        return Err(err);
    }
    Ok(())
}

fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    create_parent(target)?;
    // hard_link refuses an existing target, unlike rename
    match fs::hard_link(source, target) {
        Ok(()) => {}
        Err(err) if matches!(err.kind(), io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied) => {
            return Err(err);
        }
        Err(err) => {
            // no links across file systems, copy instead
            debug!("hard link failed ({}), copying {} instead", err, source.display());
            copy_new(source, target)?;
        }
    }
    fs::remove_file(source)
}

/// Carries out a decision: backup copy first, then the move/rename.
/// Existing files are never overwritten.
pub fn apply_relocation(file: &MediaFile, relocation: &Relocation) -> ApplyResult {
    if !file.path.exists() {
        return ApplyResult::SourceNotFound;
    }

    let mut copied = None;
    if let Some(copy) = &relocation.backup_copy {
        if copy.exists() {
            return ApplyResult::AlreadyExists;
        }
        if let Err(err) = copy_new(&file.path, copy) {
            warn!("Unable to copy {} to {}: {}", file.path.display(), copy.display(), err);
            return classify_io_error(&err);
        }
        copied = Some(copy.clone());
    }

    let target = match target_path(file, relocation) {
        Some(target) if target != file.path => target,
        _ => return copied.map(ApplyResult::Success).unwrap_or(ApplyResult::Unchanged),
    };
    if target.exists() {
        return ApplyResult::AlreadyExists;
    }

    match move_file(&file.path, &target) {
        Ok(()) => ApplyResult::Success(target),
        Err(err) => {
            warn!("Unable to move {} to {}: {}", file.path.display(), target.display(), err);
            classify_io_error(&err)
        }
    }
}
