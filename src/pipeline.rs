use crate::config::{ReleasePaths, Settings};
use crate::convert::Converter;
use crate::error::ReleaseError;
use crate::icons;
use crate::installer;
use crate::project;
use crate::resource;
use crate::types::ProjectInfo;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct Report {
    pub info: ProjectInfo,
    pub paths: ReleasePaths,
    pub written: Vec<PathBuf>,
}

/// Read the release metadata without touching any output file.
pub async fn read_info(settings: &Settings, base_dir: &Path) -> Result<ProjectInfo, ReleaseError> {
    let info = project::read_project_info(&settings.cmake_path(base_dir)).await?;
    info!(
        "Project {} {} ({}, {})",
        info.project_name, info.version, info.app_name, info.app_url
    );
    Ok(info)
}

/// Run every step in order: resource script, installer script, icons.
/// The build configuration is fully parsed before anything is written, and
/// the first failing step aborts the rest.
pub async fn run<C: Converter>(
    settings: &Settings,
    base_dir: &Path,
    converter: &mut C,
    skip_icons: bool,
) -> Result<Report, ReleaseError> {
    let info = read_info(settings, base_dir).await?;
    let paths = ReleasePaths::resolve(base_dir, settings, &info.project_name);
    let mut written = Vec::new();

    resource::write_resource_file(&paths.rc_file, &info, settings).await?;
    written.push(paths.rc_file.clone());

    installer::patch_installer_file(&paths.inno_file, &info).await?;
    written.push(paths.inno_file.clone());

    if skip_icons {
        info!("Skipping icon generation");
    } else {
        let jobs = icons::plan_icon_jobs(&info.project_name, &paths);
        written.extend(icons::generate_icons(converter, &jobs).await?);
    }

    info!("Release info updated, {} files written", written.len());
    Ok(Report {
        info,
        paths,
        written,
    })
}
