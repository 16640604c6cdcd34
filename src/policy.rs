/*!
 * Static ignore policy: always-ignored names, environment files and asset
 * extensions
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Entry names excluded from every traversal regardless of content
pub static ALWAYS_IGNORED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Dependencies
        "node_modules",
        // Version control
        ".git",
        ".gitignore",
        // OS files
        ".DS_Store",
        // Documentation
        "README.md",
        // Lockfiles
        "pnpm-lock.yaml",
        "package-lock.json",
        "yarn.lock",
    ]
    .into_iter()
    .collect()
});

/// Base-name prefix marking environment files
pub const ENV_FILE_PREFIX: &str = ".env";

pub static IMAGE_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [".png", ".jpg", ".jpeg", ".gif", ".webp", ".ico", ".svg"]
        .into_iter()
        .collect()
});

pub static FONT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [".woff", ".woff2", ".ttf", ".eot", ".otf"]
        .into_iter()
        .collect()
});

pub static VIDEO_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [".mp4", ".webm", ".mov", ".avi", ".mkv"]
        .into_iter()
        .collect()
});

/// Union of image, font and video extensions
pub static ASSET_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    IMAGE_EXTENSIONS
        .iter()
        .chain(FONT_EXTENSIONS.iter())
        .chain(VIDEO_EXTENSIONS.iter())
        .copied()
        .collect()
});

/// Exact match of a base name against the static exclusion set
pub fn is_always_ignored(name: &str) -> bool {
    ALWAYS_IGNORED.contains(name)
}

/// Whether a base name denotes an environment file (`.env`, `.env.local`, ...)
pub fn is_env_file(name: &str) -> bool {
    name.to_lowercase().starts_with(ENV_FILE_PREFIX)
}

/// Whether an extension (with its leading dot) is an asset extension
pub fn is_asset_extension(ext: &str) -> bool {
    ASSET_EXTENSIONS.contains(ext.to_lowercase().as_str())
}

/// Entries skipped by every traversal mode, before any gitignore rules
pub fn is_excluded(name: &str) -> bool {
    is_always_ignored(name) || is_env_file(name)
}
