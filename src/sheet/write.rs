use filetime::FileTime;
use serde::Serialize;
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::warn;

/// Write `value` as 2-space indented JSON (plus trailing newline) to `path`,
/// then force its access and modification times to now.
///
/// The JSON goes to a hidden sibling first, gets its times set, and is
/// renamed over `path`, so readers see either the old file or the complete,
/// freshly stamped new one.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let tmp_path = tmp_path_for(path)?;

    if let Err(e) = stage(&tmp_path, value) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io::Error::new(
            e.kind(),
            format!("renaming {:?} -> {:?}: {}", tmp_path, path, e),
        )
    })?;

    // the staged times already came across with the rename
    if let Err(e) = touch(path) {
        warn!(path = %path.display(), error = %e, "re-stamping after rename failed");
    }
    Ok(())
}

/// Set both atime and mtime of `path` to the current time.
///
/// Some storage layers keep the old mtime across a rapid rewrite, which hides
/// the change from git and friends, so this runs after every write.
pub fn touch(path: &Path) -> io::Result<()> {
    let now = FileTime::now();
    filetime::set_file_times(path, now, now)
}

fn tmp_path_for(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{:?} has no file name", path),
        )
    })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn stage<T: Serialize>(tmp_path: &Path, value: &T) -> io::Result<()> {
    write_tmp(tmp_path, value)?;
    touch(tmp_path)
}

fn write_tmp<T: Serialize>(tmp_path: &Path, value: &T) -> io::Result<()> {
    let file = fs::File::create(tmp_path)
        .map_err(|e| io::Error::new(e.kind(), format!("creating {:?}: {}", tmp_path, e)))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}
