/*!
 * Configuration handling for structify
 */

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::Result;
use crate::select::{select_paths, Prompter, SelectionMemory};
use crate::selection::Whitelist;
use crate::utils::format_output_file_name;
use crate::{bail, ensure, error};

/// Collection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Collect the entire project
    #[default]
    All,
    /// Collect only selected files and directories
    Partial,
}

/// Archive format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Markdown with fenced code blocks
    #[default]
    Md,
    /// Plain text
    Txt,
}

impl OutputFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Md => "md",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Partial => f.write_str("partial"),
        }
    }
}

/// Command-line arguments for structify
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "structify",
    version = env!("CARGO_PKG_VERSION"),
    about = "Document, organize and archive your project structure into a single file",
    after_help = "Examples:\n  \
        $ structify --project /path/to/project --mode all --output structure --outdir ./docs\n  \
        $ structify --no-interactive --mode partial --select src --select Cargo.toml"
)]
pub struct Args {
    /// Path to the project directory
    #[clap(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Collection mode
    #[clap(short, long, value_enum, default_value_t = Mode::All)]
    pub mode: Mode,

    /// Output file name (extension added from --format when missing)
    #[clap(short, long, default_value = "output")]
    pub output: String,

    /// Directory to save the output file [default: ~/Downloads, or the current directory]
    #[clap(short = 'd', long)]
    pub outdir: Option<PathBuf>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Md)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Disable interactive mode (use CLI options only)
    #[clap(long)]
    pub no_interactive: bool,

    /// Path to include in partial mode, relative to the project (repeatable)
    #[clap(short, long = "select", value_name = "PATH")]
    pub selections: Vec<PathBuf>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Fully-resolved run configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Absolute project directory
    pub start_dir: PathBuf,

    /// Collection mode
    pub mode: Mode,

    /// Selected absolute paths (empty in `All` mode)
    pub whitelist: Whitelist,

    /// Absolute output file path
    pub output_file: PathBuf,

    /// Archive format
    pub format: OutputFormat,

    /// Verbose logging
    pub verbose: bool,
}

/// The user's Downloads directory when it exists, else the current directory
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .filter(|dir| dir.is_dir())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Make a path absolute against `base` and collapse symlinks when possible
fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    fs::canonicalize(&joined).unwrap_or(joined)
}

fn output_path(output_dir: &Path, name: &str, format: OutputFormat) -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    let name = name.trim();
    ensure!(!name.is_empty(), InvalidArgument, "output file name must not be empty");
    Ok(resolve_path(output_dir, &cwd).join(format_output_file_name(name, format.extension())))
}

fn project_dir(path: &Path) -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    let start_dir = resolve_path(path, &cwd);
    ensure!(
        start_dir.is_dir(),
        PathNotFound,
        "Project directory \"{}\" does not exist. Please provide a valid path.",
        start_dir.display()
    );
    Ok(start_dir)
}

impl Config {
    /// Resolve a non-interactive run from command-line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let start_dir = project_dir(&args.project)?;

        let whitelist = match args.mode {
            Mode::All => {
                ensure!(
                    args.selections.is_empty(),
                    Config,
                    "--select can only be used with --mode partial"
                );
                Whitelist::default()
            }
            Mode::Partial => {
                ensure!(
                    !args.selections.is_empty(),
                    Config,
                    "partial mode needs --select when not interactive; \
                     use \"all\" or run interactively"
                );
                Whitelist::new(
                    args.selections
                        .iter()
                        .map(|selection| resolve_path(selection, &start_dir)),
                )
            }
        };

        let output_dir = args.outdir.clone().unwrap_or_else(default_output_dir);

        let config = Self {
            output_file: output_path(&output_dir, &args.output, args.format)?,
            start_dir,
            mode: args.mode,
            whitelist,
            format: args.format,
            verbose: args.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve an interactive run by prompting for every setting
    pub fn from_prompts<P: Prompter>(args: &Args, prompter: &mut P) -> Result<Self> {
        let default_project = resolve_path(&args.project, &env::current_dir()?);
        let project = prompter.input(
            "Path to the directory (default = current):",
            &default_project.display().to_string(),
        )?;
        let start_dir = project_dir(Path::new(&project))?;

        let mode = match prompter.choose(
            "Do you want to collect the entire project or select manually?",
            &["Entire project", "Partial (multi-level selection)"],
            0,
        )? {
            0 => Mode::All,
            _ => Mode::Partial,
        };

        let whitelist = match mode {
            Mode::All => Whitelist::default(),
            Mode::Partial => {
                let mut memory = SelectionMemory::default();
                let selected = select_paths(&start_dir, prompter, &mut memory)?;
                if selected.is_empty() {
                    bail!(Config, "Nothing was selected");
                }
                Whitelist::new(selected)
            }
        };

        let output_name =
            prompter.input("Name of the output file (without extension):", &args.output)?;

        let default_dir = args.outdir.clone().unwrap_or_else(default_output_dir);
        let output_dir = prompter.input(
            "Where to save the final file?",
            &default_dir.display().to_string(),
        )?;

        let default_format = match args.format {
            OutputFormat::Md => 0,
            OutputFormat::Txt => 1,
        };
        let format = match prompter.choose(
            "Select output format:",
            &[".md (Markdown)", ".txt (Plain Text)"],
            default_format,
        )? {
            0 => OutputFormat::Md,
            _ => OutputFormat::Txt,
        };

        let config = Self {
            output_file: output_path(Path::new(&output_dir), &output_name, format)?,
            start_dir,
            mode,
            whitelist,
            format,
            verbose: args.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.start_dir.is_dir(),
            PathNotFound,
            "Project directory \"{}\" does not exist",
            self.start_dir.display()
        );

        match self.mode {
            Mode::All if !self.whitelist.is_empty() => {
                bail!(Config, "A selection was given but the mode is \"all\"")
            }
            Mode::Partial if self.whitelist.is_empty() => {
                bail!(Config, "Partial mode requires at least one selected path")
            }
            _ => {}
        }

        for selected in self.whitelist.paths() {
            ensure!(
                selected.starts_with(&self.start_dir),
                Config,
                "Selected path \"{}\" is outside the project directory",
                selected.display()
            );
            ensure!(
                selected.exists(),
                PathNotFound,
                "Selected path \"{}\" does not exist",
                selected.display()
            );
        }

        let parent = self
            .output_file
            .parent()
            .ok_or_else(|| error!(InvalidArgument, "Output file has no parent directory"))?;
        ensure!(
            parent.is_dir(),
            PathNotFound,
            "Output directory not found: {}",
            parent.display()
        );

        Ok(())
    }
}
