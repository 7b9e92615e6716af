//! Resolve where `libnvToolsExt` should live on this machine.
//!
//! Nothing here touches the filesystem. Whether the file exists is only
//! discovered when [`crate::binding::bind`] tries to open it.

use std::path::{Path, PathBuf};

/// Base name of the NVTX shared library, without extension.
pub const LIBRARY_STEM: &str = "libnvToolsExt";

const MACOS_DEFAULT_DIR: &str = "/Developer/NVIDIA/CUDA-7.5/lib";
const LINUX_DEFAULT_DIR: &str = "/usr/local/cuda-7.0/lib64";

/// Platform families with distinct library naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Shared library extension, including the leading dot.
    pub const fn library_extension(self) -> &'static str {
        match self {
            Platform::MacOs => ".dylib",
            Platform::Linux => ".so",
            Platform::Windows => ".dll",
            Platform::Other => "",
        }
    }

    /// Default CUDA toolkit library directory. Windows has none.
    pub fn default_dir(self) -> Option<&'static Path> {
        match self {
            Platform::MacOs => Some(Path::new(MACOS_DEFAULT_DIR)),
            Platform::Linux => Some(Path::new(LINUX_DEFAULT_DIR)),
            Platform::Windows | Platform::Other => None,
        }
    }

    pub fn library_file_name(self) -> String {
        format!("{}{}", LIBRARY_STEM, self.library_extension())
    }
}

/// Pick the library path to try.
///
/// `override_dir` wins unconditionally. Without it the platform default is
/// used, and platforms without a default yield `None`.
pub fn library_path(override_dir: Option<&Path>, platform: Platform) -> Option<PathBuf> {
    let dir = override_dir.or_else(|| platform.default_dir())?;
    Some(dir.join(platform.library_file_name()))
}
