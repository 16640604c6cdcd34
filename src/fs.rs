/*!
 * Filesystem access used by the traversal core
 */

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::types::EntryInfo;

/// Directory listing and file reading capability
pub trait FileSystem {
    /// List the direct children of a directory
    fn list_entries(&self, path: &Path) -> io::Result<Vec<EntryInfo>>;

    /// Read the raw contents of a file
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        let mut entries = Vec::new();

        // Entries are sorted by name so repeated runs render identically
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path().to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            });
        }

        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_entries_sorted_and_typed() -> io::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.txt"), "b")?;
        fs::create_dir(dir.path().join("a"))?;
        fs::write(dir.path().join("a").join("nested.txt"), "n")?;

        let entries = LocalFs.list_entries(dir.path())?;
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b.txt"]);
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
        assert_eq!(entries[1].path, dir.path().join("b.txt"));

        Ok(())
    }

    #[test]
    fn test_list_missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = LocalFs
            .list_entries(&dir.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
