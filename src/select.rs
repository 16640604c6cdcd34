/*!
 * Interactive multi-level selection of files and directories
 */

use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::fs::{FileSystem, LocalFs};
use crate::policy::{is_asset_extension, is_excluded};
use crate::{bail, error};

/// Terminal interaction used by the interactive flows
pub trait Prompter {
    /// Ask for free text; an empty answer yields `default`
    fn input(&mut self, message: &str, default: &str) -> Result<String>;

    /// Pick one of `options`, returning its index
    fn choose(&mut self, message: &str, options: &[&str], default: usize) -> Result<usize>;

    /// Pick any number of `choices`, returning their indices in ascending order
    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>>;
}

/// Selections remembered per directory for one interactive session
#[derive(Debug, Clone, Default)]
pub struct SelectionMemory {
    selections: HashMap<PathBuf, Vec<PathBuf>>,
}

impl SelectionMemory {
    pub fn get(&self, dir: &Path) -> Option<&[PathBuf]> {
        self.selections.get(dir).map(Vec::as_slice)
    }

    pub fn remember(&mut self, dir: &Path, selected: Vec<PathBuf>) {
        self.selections.insert(dir.to_path_buf(), selected);
    }

    pub fn forget(&mut self, dir: &Path) {
        self.selections.remove(dir);
    }
}

/// What to do with a selected directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderAction {
    /// Select the directory wholesale
    TakeAll,
    /// Descend and select inside it
    Expand,
}

#[derive(Debug, Clone)]
enum Choice {
    Up,
    Entry { label: String, path: PathBuf, is_dir: bool },
}

impl Choice {
    fn label(&self) -> String {
        match self {
            Self::Up => ".. (Go up)".to_string(),
            Self::Entry { label, .. } => label.clone(),
        }
    }
}

/// Interactively build a whitelist of absolute paths under `root`
pub fn select_paths<P: Prompter>(
    root: &Path,
    prompter: &mut P,
    memory: &mut SelectionMemory,
) -> Result<Vec<PathBuf>> {
    let mut selected = select_in(&LocalFs, root, root, prompter, memory, true)?;

    let mut seen = HashSet::new();
    selected.retain(|path| seen.insert(path.clone()));
    Ok(selected)
}

fn directory_choices<F: FileSystem>(fs: &F, dir: &Path, root: &Path) -> io::Result<Vec<Choice>> {
    let mut entries = Vec::new();
    for entry in fs.list_entries(dir)? {
        if is_excluded(&entry.name) {
            continue;
        }
        if !entry.is_dir && entry.extension().is_some_and(|ext| is_asset_extension(&ext)) {
            continue;
        }
        let label = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        entries.push(Choice::Entry {
            label,
            path: entry.path,
            is_dir: entry.is_dir,
        });
    }
    entries.sort_by_key(Choice::label);

    let mut choices = Vec::with_capacity(entries.len() + 1);
    if dir != root {
        choices.push(Choice::Up);
    }
    choices.extend(entries);
    Ok(choices)
}

fn select_in<F: FileSystem, P: Prompter>(
    fs: &F,
    dir: &Path,
    root: &Path,
    prompter: &mut P,
    memory: &mut SelectionMemory,
    use_memory: bool,
) -> Result<Vec<PathBuf>> {
    let choices = directory_choices(fs, dir, root)?;
    let labels: Vec<String> = choices.iter().map(Choice::label).collect();

    let remembered: &[PathBuf] = if use_memory { memory.get(dir).unwrap_or(&[]) } else { &[] };
    let defaults: Vec<bool> = choices
        .iter()
        .map(|choice| match choice {
            Choice::Entry { path, .. } => remembered.contains(path),
            Choice::Up => false,
        })
        .collect();

    let dir_name = dir
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string());
    let message = format!("Select items in \"{}\":", dir_name);
    let picked = prompter.multi_select(&message, &labels, &defaults)?;

    let picked: Vec<&Choice> = picked.into_iter().filter_map(|i| choices.get(i)).collect();
    memory.remember(
        dir,
        picked
            .iter()
            .filter_map(|choice| match choice {
                Choice::Entry { path, .. } => Some(path.clone()),
                Choice::Up => None,
            })
            .collect(),
    );

    let mut results = Vec::new();
    for choice in picked {
        match choice {
            Choice::Up => {
                let Some(parent) = dir.parent() else { continue };
                if !parent.starts_with(root) {
                    continue;
                }
                memory.forget(parent);
                results.extend(select_in(fs, parent, root, prompter, memory, false)?);
            }
            Choice::Entry { path, is_dir: true, label } => {
                let folder = label.trim_end_matches('/');
                let action = prompter.choose(
                    &format!("Folder \"{}\": take everything or expand?", folder),
                    &["Take everything", "Expand (select inside)"],
                    0,
                )?;
                match folder_action(action) {
                    FolderAction::TakeAll => results.push(path.clone()),
                    FolderAction::Expand => {
                        results.extend(select_in(fs, path, root, prompter, memory, true)?)
                    }
                }
            }
            Choice::Entry { path, .. } => results.push(path.clone()),
        }
    }

    debug!(dir = %dir.display(), selected = results.len(), "selection finished");
    Ok(results)
}

fn folder_action(index: usize) -> FolderAction {
    if index == 0 {
        FolderAction::TakeAll
    } else {
        FolderAction::Expand
    }
}

/// Parse a list of 1-based numbers separated by spaces or commas into
/// sorted, deduplicated 0-based indices. Returns `None` on any invalid token.
pub fn parse_indices(line: &str, len: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let n: usize = token.parse().ok()?;
        if n == 0 || n > len {
            return None;
        }
        indices.push(n - 1);
    }
    indices.sort_unstable();
    indices.dedup();
    Some(indices)
}

/// Line-based prompter over a reader and a writer
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self) -> Result<String> {
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!(Prompt, "input ended before the answer was given");
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        write!(self.writer, "? {} ({}) ", message, default)?;
        let answer = self.read_line()?;
        Ok(if answer.is_empty() { default.to_string() } else { answer })
    }

    fn choose(&mut self, message: &str, options: &[&str], default: usize) -> Result<usize> {
        if options.is_empty() {
            return Err(error!(Prompt, "no options to choose from"));
        }
        writeln!(self.writer, "? {}", message)?;
        for (i, option) in options.iter().enumerate() {
            let marker = if i == default { '>' } else { ' ' };
            writeln!(self.writer, "  {} {}) {}", marker, i + 1, option)?;
        }

        loop {
            write!(self.writer, "  Choice [{}]: ", default + 1)?;
            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(default.min(options.len() - 1));
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.writer,
                    "  Please enter a number between 1 and {}",
                    options.len()
                )?,
            }
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>> {
        writeln!(self.writer, "? {}", message)?;
        for (i, choice) in choices.iter().enumerate() {
            let checked = if defaults.get(i).copied().unwrap_or(false) { 'x' } else { ' ' };
            writeln!(self.writer, "  [{}] {}) {}", checked, i + 1, choice)?;
        }

        loop {
            write!(
                self.writer,
                "  Numbers separated by spaces (enter keeps marked, 'none' selects nothing): "
            )?;
            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok((0..choices.len())
                    .filter(|&i| defaults.get(i).copied().unwrap_or(false))
                    .collect());
            }
            if answer.eq_ignore_ascii_case("none") {
                return Ok(Vec::new());
            }
            match parse_indices(&answer, choices.len()) {
                Some(indices) => return Ok(indices),
                None => writeln!(
                    self.writer,
                    "  Please enter numbers between 1 and {}",
                    choices.len()
                )?,
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::tempdir;

    /// Answers prompts from a fixed script
    #[derive(Default)]
    pub(crate) struct ScriptedPrompter {
        pub inputs: VecDeque<String>,
        pub choices: VecDeque<usize>,
        pub selections: VecDeque<Vec<String>>,
        /// Labels offered by every multi-select, in order
        pub offered: Vec<Vec<String>>,
        /// Default flags offered by every multi-select, in order
        pub offered_defaults: Vec<Vec<bool>>,
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, _message: &str, default: &str) -> Result<String> {
            Ok(self.inputs.pop_front().unwrap_or_else(|| default.to_string()))
        }

        fn choose(&mut self, _message: &str, _options: &[&str], default: usize) -> Result<usize> {
            Ok(self.choices.pop_front().unwrap_or(default))
        }

        fn multi_select(
            &mut self,
            _message: &str,
            choices: &[String],
            defaults: &[bool],
        ) -> Result<Vec<usize>> {
            self.offered.push(choices.to_vec());
            self.offered_defaults.push(defaults.to_vec());
            let wanted = self
                .selections
                .pop_front()
                .ok_or_else(|| error!(Prompt, "script exhausted"))?;
            Ok(choices
                .iter()
                .enumerate()
                .filter(|(_, label)| wanted.contains(label))
                .map(|(i, _)| i)
                .collect())
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src").join("sub")).unwrap();
        fs::write(dir.path().join("src").join("a.ts"), "a").unwrap();
        fs::write(dir.path().join("src").join("sub").join("b.ts"), "b").unwrap();
        fs::write(dir.path().join("main.ts"), "m").unwrap();
        fs::write(dir.path().join("logo.png"), "").unwrap();
        fs::write(dir.path().join(".env"), "X=1").unwrap();
        fs::write(dir.path().join("README.md"), "# r").unwrap();
        dir
    }

    #[test]
    fn test_choices_hide_excluded_and_assets() -> Result<()> {
        let dir = project();
        let mut prompter = ScriptedPrompter::default();
        prompter.selections.push_back(labels(&["main.ts"]));

        let selected = select_paths(dir.path(), &mut prompter, &mut SelectionMemory::default())?;

        assert_eq!(prompter.offered[0], labels(&["main.ts", "src/"]));
        assert_eq!(selected, vec![dir.path().join("main.ts")]);
        Ok(())
    }

    #[test]
    fn test_take_directory_wholesale() -> Result<()> {
        let dir = project();
        let mut prompter = ScriptedPrompter::default();
        prompter.selections.push_back(labels(&["src/"]));
        prompter.choices.push_back(0);

        let selected = select_paths(dir.path(), &mut prompter, &mut SelectionMemory::default())?;
        assert_eq!(selected, vec![dir.path().join("src")]);
        Ok(())
    }

    #[test]
    fn test_expand_directory() -> Result<()> {
        let dir = project();
        let mut prompter = ScriptedPrompter::default();
        prompter.selections.push_back(labels(&["src/"]));
        prompter.choices.push_back(1);
        prompter.selections.push_back(labels(&["a.ts"]));

        let selected = select_paths(dir.path(), &mut prompter, &mut SelectionMemory::default())?;

        assert_eq!(prompter.offered[1], labels(&[".. (Go up)", "a.ts", "sub/"]));
        assert_eq!(selected, vec![dir.path().join("src").join("a.ts")]);
        Ok(())
    }

    #[test]
    fn test_go_up_reopens_parent_without_defaults() -> Result<()> {
        let dir = project();
        let mut memory = SelectionMemory::default();
        let mut prompter = ScriptedPrompter::default();
        // Root: pick src, expand it
        prompter.selections.push_back(labels(&["src/"]));
        prompter.choices.push_back(1);
        // Inside src: go up
        prompter.selections.push_back(labels(&[".. (Go up)"]));
        // Root again: pick main.ts
        prompter.selections.push_back(labels(&["main.ts"]));

        let selected = select_paths(dir.path(), &mut prompter, &mut memory)?;

        assert_eq!(prompter.offered_defaults[2], vec![false, false]);
        assert_eq!(selected, vec![dir.path().join("main.ts")]);
        assert_eq!(memory.get(dir.path()), Some(&[dir.path().join("main.ts")][..]));
        Ok(())
    }

    #[test]
    fn test_memory_offers_previous_picks() -> Result<()> {
        let dir = project();
        let mut memory = SelectionMemory::default();
        memory.remember(dir.path(), vec![dir.path().join("main.ts")]);

        let mut prompter = ScriptedPrompter::default();
        prompter.selections.push_back(labels(&["main.ts"]));
        select_paths(dir.path(), &mut prompter, &mut memory)?;

        assert_eq!(prompter.offered_defaults[0], vec![true, false]);
        Ok(())
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("1 3,2", 3), Some(vec![0, 1, 2]));
        assert_eq!(parse_indices("2, 2", 3), Some(vec![1]));
        assert_eq!(parse_indices("", 3), Some(vec![]));
        assert_eq!(parse_indices("0", 3), None);
        assert_eq!(parse_indices("4", 3), None);
        assert_eq!(parse_indices("x", 3), None);
    }

    #[test]
    fn test_terminal_prompter() -> Result<()> {
        let input = b"\n7\n2\n1 3\n" as &[u8];
        let mut output = Vec::new();
        let mut prompter = TerminalPrompter::new(input, &mut output);

        assert_eq!(prompter.input("Name?", "output")?, "output");
        assert_eq!(prompter.choose("Mode?", &["all", "partial"], 0)?, 1);
        let picked = prompter.multi_select("Pick", &labels(&["a", "b", "c"]), &[false; 3])?;
        assert_eq!(picked, vec![0, 2]);

        let printed = String::from_utf8_lossy(&output);
        assert!(printed.contains("Please enter a number between 1 and 2"));
        Ok(())
    }

    #[test]
    fn test_terminal_prompter_end_of_input() {
        let mut output = Vec::new();
        let mut prompter = TerminalPrompter::new(&b""[..], &mut output);
        let err = prompter.input("Name?", "x").unwrap_err();
        assert!(matches!(err, crate::error::StructifyError::Prompt(_)));
    }
}
