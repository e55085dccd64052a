use crate::error::ReleaseError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional settings file looked up in the packaging directory.
pub const SETTINGS_FILE_NAME: &str = "release-info.json";

/// Expanded to the CMake project name in `rcFile` and `svgIcon`.
const PROJECT_TOKEN: &str = "{project}";

/// Persisted settings. Every key is optional; missing keys take the defaults
/// below. Relative paths resolve against the packaging directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub cmake_file: String,
    pub rc_file: String,
    pub inno_file: String,
    pub svg_icon: String,
    /// Image conversion program, looked up on `PATH`.
    pub converter: String,
    /// Appended to the app name in the resource `FileDescription`.
    pub file_description: String,
    pub copyright_year: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cmake_file: "../CMakeLists.txt".to_string(),
            rc_file: "win/{project}.rc".to_string(),
            inno_file: "win/innosetup.iss".to_string(),
            svg_icon: "../images/svg/{project}.svg".to_string(),
            converter: "convert".to_string(),
            file_description: "Advanced Log Viewer".to_string(),
            copyright_year: "2022".to_string(),
        }
    }
}

impl Settings {
    /// Location of the build configuration, known before the project name is.
    pub fn cmake_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.cmake_file)
    }
}

/// Every file location a run touches, resolved once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePaths {
    pub base_dir: PathBuf,
    pub cmake_file: PathBuf,
    pub rc_file: PathBuf,
    /// Sits next to `rc_file`, which refers to it by bare file name.
    pub ico_file: PathBuf,
    pub inno_file: PathBuf,
    pub svg_icon: PathBuf,
}

impl ReleasePaths {
    pub fn resolve(base_dir: &Path, settings: &Settings, project_name: &str) -> Self {
        let expand = |value: &str| base_dir.join(value.replace(PROJECT_TOKEN, project_name));
        let rc_file = expand(&settings.rc_file);
        Self {
            base_dir: base_dir.to_path_buf(),
            cmake_file: settings.cmake_path(base_dir),
            ico_file: rc_file.with_file_name(format!("{}.ico", project_name)),
            rc_file,
            inno_file: expand(&settings.inno_file),
            svg_icon: expand(&settings.svg_icon),
        }
    }
}

pub fn settings_path(base_dir: &Path) -> PathBuf {
    base_dir.join(SETTINGS_FILE_NAME)
}

/// Load the settings from the packaging directory, returning defaults if the
/// file is missing. A file that exists but cannot be parsed is an error.
pub fn load_settings(base_dir: &Path) -> Result<Settings, ReleaseError> {
    let path = settings_path(base_dir);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(&path).map_err(ReleaseError::io("read", &path))?;
    serde_json::from_str(&contents).map_err(|e| ReleaseError::Settings {
        path,
        message: e.to_string(),
    })
}

/// Persist the settings into the packaging directory.
pub fn save_settings(base_dir: &Path, settings: &Settings) -> Result<PathBuf, ReleaseError> {
    let path = settings_path(base_dir);
    fs::create_dir_all(base_dir).map_err(ReleaseError::io("create directory", base_dir))?;
    let json = serde_json::to_string_pretty(settings).map_err(|e| ReleaseError::Settings {
        path: path.clone(),
        message: e.to_string(),
    })?;
    fs::write(&path, json).map_err(ReleaseError::io("write", &path))?;
    Ok(path)
}

/// Write the default settings unless a settings file already exists.
/// Returns the written path, or `None` when the existing file was kept.
pub fn init_settings(base_dir: &Path) -> Result<Option<PathBuf>, ReleaseError> {
    if settings_path(base_dir).exists() {
        return Ok(None);
    }
    save_settings(base_dir, &Settings::default()).map(Some)
}
