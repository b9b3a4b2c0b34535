//! File helpers: name checks, lock probing, versioned backups.

use crate::core::Arg;
use crate::core::coerce::mismatch;
use crate::error::{IoError, Result, TimeError};
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Windows `ERROR_SHARING_VIOLATION`.
const ERROR_SHARING_VIOLATION: i32 = 32;

/// Windows `ERROR_LOCK_VIOLATION`.
const ERROR_LOCK_VIOLATION: i32 = 33;

/// True when `path` names a file with no parent directory.
///
/// ```
/// use isostamp::support::is_filename_only;
///
/// assert!(is_filename_only("notes.txt").unwrap());
/// assert!(!is_filename_only("logs/notes.txt").unwrap());
/// ```
///
/// # Errors
///
/// [`TimeError::TypeMismatch`] for `Null`, non-string, empty or
/// whitespace-only input.
pub fn is_filename_only(path: impl Into<Arg>) -> std::result::Result<bool, TimeError> {
    let path = path.into();
    let text = path
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| mismatch("non-empty path_str", &path))?;
    Ok(Path::new(text)
        .parent()
        .is_some_and(|parent| parent.as_os_str().is_empty() || parent == Path::new(".")))
}

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// [`IoError::FileNotFound`] if the file is missing, [`IoError::ReadFailed`]
/// if it cannot be read.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    fs::read_to_string(path_ref).map_err(|e| {
        IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Strict lock probe.
///
/// Opens the file for appending without writing anything. Only the Windows
/// sharing and lock violations mean the file is held by someone else. A
/// permission error says nothing about locks, so a read-only file reads as
/// unlocked.
///
/// # Errors
///
/// [`IoError::FileNotFound`] if the file is missing and
/// [`IoError::ReadFailed`] for any other unexpected I/O error.
pub fn check_file_locked<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.is_file() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    match OpenOptions::new().append(true).open(path_ref) {
        Ok(_) => Ok(false),
        Err(e)
            if cfg!(windows)
                && matches!(
                    e.raw_os_error(),
                    Some(ERROR_SHARING_VIOLATION | ERROR_LOCK_VIOLATION)
                ) =>
        {
            tracing::debug!(path = %path_str, "file is locked: sharing violation");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            tracing::debug!(path = %path_str, "file is not writable, treating as unlocked");
            Ok(false)
        }
        Err(e) => Err(IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        }
        .into()),
    }
}

/// Forgiving lock probe: any failure, including a missing file, reads as
/// "not locked".
#[must_use]
pub fn is_file_locked<P: AsRef<Path>>(path: P) -> bool {
    check_file_locked(path).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "lock probe failed, treating file as unlocked");
        false
    })
}

fn wildcard(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$"))
        .map_err(|e| IoError::Generic(format!("bad file pattern '{pattern}': {e}")).into())
}

fn matching_files(src: &Path) -> Result<Vec<PathBuf>> {
    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if !name.contains('*') {
        return Ok(vec![src.to_path_buf()]);
    }

    let dir = match src.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let pattern = wildcard(&name)?;
    let entries = fs::read_dir(&dir).map_err(|e| IoError::ReadFailed {
        path: dir.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;

    let mut matched: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| pattern.is_match(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    matched.sort();
    Ok(matched)
}

fn next_version(file: &Path, dst_dir: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let suffix = file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (1_u64..)
        .map(|n| dst_dir.join(format!("{stem}_v{n}{suffix}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dst_dir.join(format!("{stem}_v0{suffix}")))
}

/// Copies `src` into `dst_dir` as `stem_vN.ext` with the lowest unused
/// `N >= 1`.
///
/// The file name of `src` may contain `*` wildcards, in which case every
/// matching regular file in its directory is copied. Directories and
/// missing files are skipped. `dst_dir` is created if needed.
///
/// # Errors
///
/// Returns an error if `dst_dir` cannot be created, the source directory
/// cannot be listed or a copy fails.
pub fn copy_backup<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst_dir: Q) -> Result<Vec<PathBuf>> {
    let dst_dir = dst_dir.as_ref();
    fs::create_dir_all(dst_dir).map_err(|e| IoError::DirectoryFailed {
        path: dst_dir.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;

    let mut copied = Vec::new();
    for file in matching_files(src.as_ref())? {
        if !file.is_file() {
            continue;
        }
        let target = next_version(&file, dst_dir);
        fs::copy(&file, &target).map_err(|e| IoError::WriteFailed {
            path: target.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(from = %file.display(), to = %target.display(), "backup copied");
        copied.push(target);
    }
    Ok(copied)
}
