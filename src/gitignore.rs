/*!
 * `.gitignore` support for the project root
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

use crate::error::Result;
use crate::utils::relative_slash_path;

/// Name of the rules file read from the project root
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Matcher built from the project root's `.gitignore`
#[derive(Debug, Clone)]
pub struct GitignoreMatcher {
    matcher: Gitignore,
}

impl GitignoreMatcher {
    /// Load `<root>/.gitignore`.
    ///
    /// A missing file yields `Ok(None)`, meaning nothing is ignored. Any
    /// other read failure is returned as an error.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = root.join(GITIGNORE_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no .gitignore found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let matcher = Self::from_rules(root, &content)?;
        debug!(
            path = %path.display(),
            rules = matcher.matcher.num_ignores() + matcher.matcher.num_whitelists(),
            "loaded .gitignore"
        );
        Ok(Some(matcher))
    }

    /// Build a matcher from the text of an ignore file.
    ///
    /// Lines that do not parse as a glob are skipped with a warning, so
    /// they never match anything.
    pub fn from_rules(root: &Path, content: &str) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let source = Some(root.join(GITIGNORE_FILE));
        for (index, line) in content.lines().enumerate() {
            if let Err(e) = builder.add_line(source.clone(), line) {
                warn!(
                    line = index + 1,
                    pattern = line,
                    error = %e,
                    "skipping .gitignore rule"
                );
            }
        }
        Ok(Self {
            matcher: builder.build()?,
        })
    }

    /// Whether a path relative to the project root is ignored.
    ///
    /// The path is normalized to `/` separators before matching.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        let normalized = PathBuf::from(relative_slash_path(relative));
        if normalized.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(&normalized, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_returns_matcher_when_file_exists() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(GITIGNORE_FILE), "node_modules\ndist\n")?;

        let matcher = GitignoreMatcher::load(dir.path())?.expect("matcher");
        assert!(matcher.is_ignored(Path::new("node_modules"), true));
        assert!(matcher.is_ignored(Path::new("dist"), true));
        assert!(!matcher.is_ignored(Path::new("src"), true));

        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_absent() -> Result<()> {
        let dir = tempdir()?;
        assert!(GitignoreMatcher::load(&dir.path().join("nonexistent"))?.is_none());
        Ok(())
    }

    #[test]
    fn test_load_unreadable_rules_propagates() {
        let dir = tempdir().unwrap();
        // A directory in place of the rules file cannot be read as text
        fs::create_dir(dir.path().join(GITIGNORE_FILE)).unwrap();
        assert!(GitignoreMatcher::load(dir.path()).is_err());
    }

    #[test]
    fn test_pattern_semantics() -> Result<()> {
        let root = Path::new("/project");
        let rules = "# comment\n\n*.log\n!keep.log\nbuild/\n/anchored.txt\n";
        let matcher = GitignoreMatcher::from_rules(root, rules)?;

        assert!(matcher.is_ignored(Path::new("debug.log"), false));
        assert!(matcher.is_ignored(Path::new("nested/deep/trace.log"), false));
        assert!(!matcher.is_ignored(Path::new("keep.log"), false));

        assert!(matcher.is_ignored(Path::new("build"), true));
        assert!(!matcher.is_ignored(Path::new("build"), false));
        assert!(matcher.is_ignored(Path::new("build/output.bin"), false));

        assert!(matcher.is_ignored(Path::new("anchored.txt"), false));
        assert!(!matcher.is_ignored(Path::new("sub/anchored.txt"), false));

        Ok(())
    }

    #[test]
    fn test_unparsable_rules_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join(GITIGNORE_FILE),
            "build/\na{b\nfoo\\\n[z-a]\n{a,b\n*.log\n",
        )?;

        let matcher = GitignoreMatcher::load(dir.path())?.expect("matcher");
        assert!(matcher.is_ignored(Path::new("build"), true));
        assert!(matcher.is_ignored(Path::new("trace.log"), false));
        assert!(!matcher.is_ignored(Path::new("src"), true));
        assert!(!matcher.is_ignored(Path::new("a{b"), false));

        Ok(())
    }

    #[test]
    fn test_empty_relative_path_is_never_ignored() -> Result<()> {
        let matcher = GitignoreMatcher::from_rules(Path::new("/project"), "*\n")?;
        assert!(!matcher.is_ignored(Path::new(""), true));
        Ok(())
    }
}
