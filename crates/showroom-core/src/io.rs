use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Readers of sites.json never observe a torn file.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Recursively copy `src` into `dst` (used to scaffold a company folder from
/// the template folder). `dst` must not exist yet.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets/sites.json");
        atomic_write(&path, b"{}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sites.json");
        atomic_write(&path, b"old").unwrap();
        atomic_write(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn copy_dir_copies_nested_tree() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("company-template");
        std::fs::create_dir_all(src.join("css")).unwrap();
        std::fs::write(src.join("index.html"), "<html></html>").unwrap();
        std::fs::write(src.join("css/site.css"), "body {}").unwrap();

        let dst = dir.path().join("acme");
        copy_dir(&src, &dst).unwrap();

        assert_eq!(
            std::fs::read_to_string(dst.join("index.html")).unwrap(),
            "<html></html>"
        );
        assert_eq!(
            std::fs::read_to_string(dst.join("css/site.css")).unwrap(),
            "body {}"
        );
    }
}
