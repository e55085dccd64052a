use crate::error::ReleaseError;
use crate::types::ProjectInfo;
use regex::{Captures, Regex};
use std::path::Path;
use tracing::{debug, info};

/// Replace the quoted value of `#define <name> "<value>"` with `value`.
///
/// The definition must appear exactly once. `value` is inserted as-is, so
/// characters like `$` or `\` are never interpreted.
pub fn replace_define(content: &str, name: &str, value: &str) -> Result<String, ReleaseError> {
    let re = Regex::new(&format!(r#"(#define\s+{}\s+")[^"]+(")"#, regex::escape(name)))?;

    let found = re.find_iter(content).count();
    if found != 1 {
        return Err(ReleaseError::PlaceholderCount {
            name: name.to_string(),
            found,
        });
    }

    let patched = re.replace(content, |caps: &Captures| {
        format!("{}{}{}", &caps[1], value, &caps[2])
    });
    Ok(patched.into_owned())
}

/// Apply the four release defines (`ProjName`, `AppName`, `AppVersion`,
/// `AppURL`) to the installer script text.
pub fn patch_defines(content: &str, info: &ProjectInfo) -> Result<String, ReleaseError> {
    let version = info.version.to_string();
    let defines = [
        ("ProjName", info.project_name.as_str()),
        ("AppName", info.app_name.as_str()),
        ("AppVersion", version.as_str()),
        ("AppURL", info.app_url.as_str()),
    ];

    let mut patched = content.to_string();
    for (name, value) in defines {
        debug!("#define {} \"{}\"", name, value);
        patched = replace_define(&patched, name, value)?;
    }
    Ok(patched)
}

/// Patch the installer script in place. Nothing is written unless all four
/// defines were found.
pub async fn patch_installer_file(path: &Path, info: &ProjectInfo) -> Result<(), ReleaseError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(ReleaseError::io("read", path))?;
    let patched = patch_defines(&content, info)?;
    tokio::fs::write(path, patched)
        .await
        .map_err(ReleaseError::io("write", path))?;
    info!("Updated installer script {}", path.display());
    Ok(())
}
