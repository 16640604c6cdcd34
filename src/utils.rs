/*!
 * Utility functions for structify
 */

use std::path::{Component, Path};

/// Append `.<format>` to an output name unless it already has an extension
pub fn format_output_file_name(output_name: &str, format: &str) -> String {
    if Path::new(output_name).extension().is_some() {
        output_name.to_string()
    } else {
        format!("{}.{}", output_name, format)
    }
}

/// Render a relative path with `/` separators regardless of the host
pub fn relative_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` relative to `base`, `/`-separated; falls back to the full path
pub fn display_relative(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => relative_slash_path(rel),
        Err(_) => path.display().to_string(),
    }
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_output_name_keeps_existing_extension() {
        assert_eq!(format_output_file_name("output.txt", "md"), "output.txt");
    }

    #[test]
    fn test_output_name_appends_format() {
        assert_eq!(format_output_file_name("output", "md"), "output.md");
        assert_eq!(format_output_file_name("myfile", "txt"), "myfile.txt");
    }

    #[test]
    fn test_relative_slash_path() {
        let path: PathBuf = ["src", "sub", "b.ts"].iter().collect();
        assert_eq!(relative_slash_path(&path), "src/sub/b.ts");
        assert_eq!(relative_slash_path(Path::new("./a/b")), "a/b");
        assert_eq!(relative_slash_path(Path::new("")), "");
    }

    #[test]
    fn test_display_relative() {
        let base = Path::new("/project");
        assert_eq!(display_relative(Path::new("/project/src/a.ts"), base), "src/a.ts");
        assert_eq!(display_relative(base, base), ".");
        assert_eq!(display_relative(Path::new("/elsewhere/x"), base), "/elsewhere/x");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(12), "12 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }
}
