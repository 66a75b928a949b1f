use std::io::Write;
use std::path::Path;

use rand::TryRngCore;

/// Write `data` to `path` via a sibling temp file and a rename, so readers
/// never observe a half-written document.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::other("path has no parent directory"))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("path has no file name"))?;

    let mut last_err = None;
    for _ in 0..5 {
        let mut bytes = [0u8; 6];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| std::io::Error::other(format!("temp suffix unavailable: {err}")))?;
        let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let tmp_path = dir.join(format!("{}.tmp-{suffix}", file_name.to_string_lossy()));

        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(err) => return Err(err),
        };

        let written = file.write_all(data).and_then(|()| file.sync_all());
        drop(file);
        if let Err(err) = written.and_then(|()| replace_file(&tmp_path, path)) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }
        return Ok(());
    }

    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("no free temporary file name for {}", path.display()),
        )
    }))
}

fn replace_file(temp_path: &Path, path: &Path) -> std::io::Result<()> {
    match std::fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        #[cfg(target_os = "windows")]
        Err(err)
            if err.kind() == std::io::ErrorKind::AlreadyExists
                || err.kind() == std::io::ErrorKind::PermissionDenied =>
        {
            if let Err(inner) = std::fs::remove_file(path)
                && inner.kind() != std::io::ErrorKind::NotFound
            {
                return Err(inner);
            }
            std::fs::rename(temp_path, path)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_contents_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        atomic_write(&path, b"[1]").unwrap();
        atomic_write(&path, b"[2]").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[2]");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temp files should be renamed away");
    }

    #[test]
    fn missing_parent_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("doc.json");
        assert!(atomic_write(&path, b"{}").is_err());
    }
}
