/*!
 * Assets-only directory classification
 */

use std::io;
use std::path::Path;

use crate::fs::FileSystem;
use crate::policy::{is_asset_extension, is_excluded};

/// Whether every non-excluded entry under `dir` is an asset file.
///
/// Empty directories count as assets-only. Gitignore rules are not
/// consulted: this is a property of the subtree on disk. Listing errors
/// are returned, never treated as a classification.
pub fn is_assets_only<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> io::Result<bool> {
    for entry in fs.list_entries(dir)? {
        if is_excluded(&entry.name) {
            continue;
        }

        if entry.is_dir {
            if !is_assets_only(fs, &entry.path)? {
                return Ok(false);
            }
        } else {
            let is_asset = entry
                .extension()
                .is_some_and(|ext| is_asset_extension(&ext));
            if !is_asset {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_non_asset_file_present() -> io::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("image.png"), "")?;
        fs::write(dir.path().join("file.txt"), "some content")?;

        assert!(!is_assets_only(&LocalFs, dir.path())?);
        Ok(())
    }

    #[test]
    fn test_only_assets() -> io::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("pic.png"), "")?;
        fs::write(dir.path().join("font.WOFF2"), "")?;
        fs::create_dir(dir.path().join("clips"))?;
        fs::write(dir.path().join("clips").join("intro.mp4"), "")?;

        assert!(is_assets_only(&LocalFs, dir.path())?);
        Ok(())
    }

    #[test]
    fn test_empty_directory_is_assets_only() -> io::Result<()> {
        let dir = tempdir()?;
        assert!(is_assets_only(&LocalFs, dir.path())?);
        Ok(())
    }

    #[test]
    fn test_deeply_nested_non_asset() -> io::Result<()> {
        let dir = tempdir()?;
        let deep = dir.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep)?;
        fs::write(dir.path().join("logo.svg"), "")?;
        fs::write(deep.join("notes.md"), "# hi")?;

        assert!(!is_assets_only(&LocalFs, dir.path())?);
        Ok(())
    }

    #[test]
    fn test_excluded_entries_do_not_count() -> io::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("pic.jpg"), "")?;
        fs::write(dir.path().join(".env.local"), "SECRET=1")?;
        fs::write(dir.path().join(".DS_Store"), "")?;
        fs::create_dir(dir.path().join("node_modules"))?;
        fs::write(dir.path().join("node_modules").join("index.js"), "")?;

        assert!(is_assets_only(&LocalFs, dir.path())?);
        Ok(())
    }

    #[test]
    fn test_extensionless_file_is_not_an_asset() -> io::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("LICENSE"), "MIT")?;
        assert!(!is_assets_only(&LocalFs, dir.path())?);
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(is_assets_only(&LocalFs, &dir.path().join("missing")).is_err());
    }
}
