use crate::config::Settings;
use crate::error::ReleaseError;
use crate::types::ProjectInfo;
use std::path::Path;
use tracing::info;

/// Render the Windows resource script (icon reference and `VERSIONINFO` block).
pub fn render(info: &ProjectInfo, settings: &Settings) -> String {
    let project = &info.project_name;
    let app = &info.app_name;
    let major = info.version.major;
    let minor = info.version.minor;
    let patch = info.version.patch;
    let description = &settings.file_description;
    let year = &settings.copyright_year;

    format!(
        r#"
IDI_ICON1 ICON DISCARDABLE "{project}.ico"

#include <windows.h>

VS_VERSION_INFO VERSIONINFO
FILEVERSION     {major},{minor},{patch},0
PRODUCTVERSION  {major},{minor},{patch},0
BEGIN
    BLOCK "StringFileInfo"
    BEGIN
        BLOCK "040904E4"
        BEGIN
            VALUE "CompanyName",        "{app} Project"
            VALUE "FileDescription",    "{app} - {description}"
            VALUE "FileVersion",        "{major}.{minor}.{patch}.0\0"
            VALUE "InternalName",       "{app}"
            VALUE "LegalCopyright",     "(c) {year} {app} Project"
            VALUE "OriginalFilename",   "{project}.exe"
            VALUE "ProductName",        "{app}"
            VALUE "ProductVersion",     "{major}.{minor}.{patch}\0"
        END
    END

    BLOCK "VarFileInfo"
    BEGIN
        VALUE "Translation", 0x409, 1252
    END
END
"#
    )
}

/// Overwrite `path` with the rendered resource script.
pub async fn write_resource_file(
    path: &Path,
    info: &ProjectInfo,
    settings: &Settings,
) -> Result<(), ReleaseError> {
    tokio::fs::write(path, render(info, settings))
        .await
        .map_err(ReleaseError::io("write", path))?;
    info!("Updated resource script {}", path.display());
    Ok(())
}
