use std::fmt;
use std::path::PathBuf;

/// Three-part version from the `project(<name> VERSION x.y.z` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Release metadata read from the build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// CMake project identifier, also the stem of every generated icon.
    pub project_name: String,
    pub version: Version,
    /// Human readable application name (`APP_NAME`).
    pub app_name: String,
    pub app_url: String,
}

/// Target of a single icon artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Windows `.ico` with the embedded sizes picked by the converter.
    MultiResolution,
    /// Square PNG of the given edge length.
    Pixels(u32),
    /// Unchanged copy of the vector source.
    Scalable,
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconSize::MultiResolution => write!(f, "ico"),
            IconSize::Pixels(n) => write!(f, "{}x{}", n, n),
            IconSize::Scalable => write!(f, "scalable"),
        }
    }
}

/// One icon to produce from the vector source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconJob {
    pub size: IconSize,
    pub source: PathBuf,
    pub destination: PathBuf,
}
