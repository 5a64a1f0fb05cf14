use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    pub backup_path: Option<PathBuf>,
    pub final_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("could not create backup of {path}")]
    BackupCreate {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0} has no parent directory")]
    NoParent(String),
}

/// Replace the contents of an existing file.
///
/// Symlinks are resolved first, so the file they point at is rewritten and
/// the link stays a link. The new bytes go to a sibling temp file that is
/// renamed over the target, so the target is never left truncated. A file
/// with more than one hard link is rewritten through its existing inode
/// instead, since a rename would split it from its other names. With
/// `backup` set the original is copied aside first.
pub fn write_in_place(
    target: &Path,
    contents: &[u8],
    backup: bool,
) -> Result<WriteOutcome, WriteError> {
    let target = dunce::canonicalize(target)?;
    let parent = target
        .parent()
        .ok_or_else(|| WriteError::NoParent(target.display().to_string()))?;

    let backup_path = if backup {
        let candidate = backup_path_for(&target, parent);
        fs::copy(&target, &candidate).map_err(|source| WriteError::BackupCreate {
            path: target.display().to_string(),
            source,
        })?;
        log::info!("backed up {} to {}", target.display(), candidate.display());
        Some(candidate)
    } else {
        None
    };

    let metadata = fs::metadata(&target)?;
    if has_other_links(&metadata) {
        log::debug!("{} is hard-linked, writing through", target.display());
        write_through(&target, contents)?;
    } else {
        write_and_swap(&target, contents, metadata.permissions())?;
    }

    Ok(WriteOutcome {
        backup_path,
        final_path: target,
    })
}

fn write_and_swap(
    target: &Path,
    contents: &[u8],
    permissions: fs::Permissions,
) -> io::Result<()> {
    let temp_path = build_temp_path(target);
    let result = (|| -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        drop(file);
        fs::set_permissions(&temp_path, permissions)?;
        swap(&temp_path, target)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_through(target: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(target)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(unix)]
fn has_other_links(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink() > 1
}

#[cfg(not(unix))]
fn has_other_links(_metadata: &fs::Metadata) -> bool {
    false
}

#[cfg(target_os = "windows")]
fn swap(temp_path: &Path, target: &Path) -> io::Result<()> {
    use std::io::ErrorKind;
    match fs::rename(temp_path, target) {
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            fs::remove_file(target)?;
            fs::rename(temp_path, target)
        }
        other => other,
    }
}

#[cfg(not(target_os = "windows"))]
fn swap(temp_path: &Path, target: &Path) -> io::Result<()> {
    fs::rename(temp_path, target)
}

fn backup_path_for(target: &Path, parent: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let mut name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(format!(".bak.{timestamp}"));
    parent.join(name)
}

fn build_temp_path(target: &Path) -> PathBuf {
    let mut temp = target.to_path_buf();
    let pid = std::process::id();
    match temp.file_name() {
        Some(name) => {
            let mut os_string = name.to_os_string();
            os_string.push(format!(".__tmp__pid_{pid}"));
            temp.set_file_name(os_string);
        }
        None => temp.push(format!("temp_{pid}")),
    }
    temp
}
