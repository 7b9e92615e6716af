//! Runtime configuration.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::locate::Platform;

/// Environment variable naming the directory that holds `libnvToolsExt`.
pub const LIBRARY_DIR_ENV: &str = "NVTX_CUDA_TOOLKIT";
/// Older name for [`LIBRARY_DIR_ENV`], still honored when the new one is unset.
pub const LEGACY_LIBRARY_DIR_ENV: &str = "NVTXPY_CUDA_TOOLKIT";

/// Configuration used to locate and bind the native profiling library.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the NVTX library. Overrides the platform default.
    pub library_dir: Option<PathBuf>,
    /// Platform used to pick the default directory and file extension.
    pub platform: Platform,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_dir: None,
            platform: Platform::current(),
        }
    }
}

impl Config {
    /// Build a config from the process environment.
    ///
    /// `NVTX_CUDA_TOOLKIT` wins over `NVTXPY_CUDA_TOOLKIT`. An empty value is
    /// treated the same as an unset one.
    pub fn from_env() -> Self {
        Self {
            library_dir: library_dir_from(|name| env::var_os(name)),
            ..Default::default()
        }
    }

    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// The library file this config points at, if any.
    pub fn library_path(&self) -> Option<PathBuf> {
        crate::locate::library_path(self.library_dir.as_deref(), self.platform)
    }
}

fn library_dir_from(lookup: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    [LIBRARY_DIR_ENV, LEGACY_LIBRARY_DIR_ENV]
        .into_iter()
        .filter_map(|name| lookup(name).filter(|dir| !dir.is_empty()))
        .map(PathBuf::from)
        .next()
}
