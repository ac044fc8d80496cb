//! Toolchain constants and the per-run context.
//!
//! Paths and settings are collected once into a [`Context`] and handed by
//! reference to each phase that needs them.

use std::path::{Path, PathBuf};

pub mod settings;

pub use settings::{BuildMode, BuildSettings};

pub const VERSION: &str = "@developer_beta 0.0.1";
pub const SRC_EXT: &str = ".xx";
pub const DOC_EXT: &str = ".xdoc";
pub const SETTINGS_FILE: &str = "x.set";
pub const STDLIB: &str = "lib";
pub const LOCALIZATIONS: &str = "localization";
pub const ENTRY_POINT: &str = "main";
pub const ANONYMOUS: &str = "<anonymous>";
pub const DOC_PREFIX: &str = "doc:";

pub const PLATFORM_WINDOWS: &str = "windows";
pub const PLATFORM_LINUX: &str = "linux";
pub const PLATFORM_DARWIN: &str = "darwin";

pub const PLATFORMS: [&str; 3] = [PLATFORM_WINDOWS, PLATFORM_LINUX, PLATFORM_DARWIN];

/// Everything a run needs to know about its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub exec_path: PathBuf,
    pub stdlib_path: PathBuf,
    pub langs_path: PathBuf,
    pub settings: BuildSettings,
    pub entry_point: String,
}

impl Context {
    /// Builds the context for a toolchain installed in `exec_path`.
    pub fn new(exec_path: impl Into<PathBuf>, settings: BuildSettings) -> Self {
        let exec_path = exec_path.into();
        Context {
            stdlib_path: exec_path.join(STDLIB),
            langs_path: exec_path.join(LOCALIZATIONS),
            exec_path,
            settings,
            entry_point: String::from(ENTRY_POINT),
        }
    }

    pub fn is_source_file(path: &Path) -> bool {
        path.to_str().is_some_and(|path| path.ends_with(SRC_EXT))
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(PathBuf::from("."), BuildSettings::default())
    }
}

#[cfg(test)]
mod tests;
