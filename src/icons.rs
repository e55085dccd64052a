use crate::config::ReleasePaths;
use crate::convert::Converter;
use crate::error::ReleaseError;
use crate::types::{IconJob, IconSize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Raster sizes installed into the XDG hicolor theme.
pub const PNG_SIZES: [u32; 6] = [16, 24, 32, 64, 128, 256];

/// Root of the XDG icon theme tree under the packaging directory.
pub fn hicolor_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("linux/xdg/icons/hicolor")
}

/// Every icon a run produces, in the order they are generated: the Windows
/// `.ico` beside the resource script, the scalable copy, then one PNG per
/// entry of [`PNG_SIZES`].
pub fn plan_icon_jobs(project_name: &str, paths: &ReleasePaths) -> Vec<IconJob> {
    let svg_icon = paths.svg_icon.as_path();
    let hicolor = hicolor_dir(&paths.base_dir);
    let svg_name = svg_icon
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}.svg", project_name)));

    let mut jobs = vec![
        IconJob {
            size: IconSize::MultiResolution,
            source: svg_icon.to_path_buf(),
            destination: paths.ico_file.clone(),
        },
        IconJob {
            size: IconSize::Scalable,
            source: svg_icon.to_path_buf(),
            destination: hicolor.join("scalable/apps").join(svg_name),
        },
    ];

    for size in PNG_SIZES {
        jobs.push(IconJob {
            size: IconSize::Pixels(size),
            source: svg_icon.to_path_buf(),
            destination: hicolor
                .join(format!("{}x{}", size, size))
                .join("apps")
                .join(format!("{}.png", project_name)),
        });
    }

    jobs
}

/// Converter arguments for a job, or `None` when the job is a plain copy.
pub fn converter_args(job: &IconJob) -> Option<Vec<String>> {
    let source = job.source.to_string_lossy().into_owned();
    let destination = job.destination.to_string_lossy().into_owned();

    let args = match job.size {
        IconSize::MultiResolution => [
            "-density",
            "256x256",
            "-background",
            "transparent",
            source.as_str(),
            "-define",
            "icon:auto-resize",
            "-colors",
            "256",
            destination.as_str(),
        ]
        .map(String::from),
        IconSize::Pixels(size) => {
            let geometry = format!("{}x{}", size, size);
            [
                "-define",
                "png:exclude-chunks=all",
                "-density",
                "1200",
                "-background",
                "transparent",
                "-resize",
                geometry.as_str(),
                source.as_str(),
                destination.as_str(),
            ]
            .map(String::from)
        }
        IconSize::Scalable => return None,
    };

    Some(Vec::from(args))
}

/// Produce every job in order, creating the XDG directories as needed.
/// Returns the written paths; stops at the first failure.
pub async fn generate_icons<C: Converter>(
    converter: &mut C,
    jobs: &[IconJob],
) -> Result<Vec<PathBuf>, ReleaseError> {
    let mut written = Vec::with_capacity(jobs.len());

    for job in jobs {
        if job.size != IconSize::MultiResolution {
            if let Some(dir) = job.destination.parent() {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(ReleaseError::io("create directory", dir))?;
            }
        }

        match converter_args(job) {
            Some(args) => converter.run(&args).await?,
            None => {
                tokio::fs::copy(&job.source, &job.destination)
                    .await
                    .map_err(ReleaseError::io("copy", &job.source))?;
            }
        }

        info!("Generated {} icon {}", job.size, job.destination.display());
        written.push(job.destination.clone());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records invocations and fails once `fail_at` calls have succeeded.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Vec<String>>,
        fail_at: Option<usize>,
    }

    impl Converter for Recorder {
        async fn run(&mut self, args: &[String]) -> Result<(), ReleaseError> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(ReleaseError::Converter {
                    program: "fake".to_string(),
                    args: args.join(" "),
                    reason: "exited with exit status: 1".to_string(),
                });
            }
            self.calls.push(args.to_vec());
            Ok(())
        }
    }

    fn paths_for(svg_icon: &Path, base_dir: &Path) -> ReleasePaths {
        ReleasePaths {
            base_dir: base_dir.to_path_buf(),
            cmake_file: base_dir.join("../CMakeLists.txt"),
            rc_file: base_dir.join("win/Foo.rc"),
            ico_file: base_dir.join("win/Foo.ico"),
            inno_file: base_dir.join("win/innosetup.iss"),
            svg_icon: svg_icon.to_path_buf(),
        }
    }

    #[test]
    fn plan_covers_ico_scalable_and_six_pngs() {
        let base = Path::new("/pkg");
        let jobs = plan_icon_jobs("Foo", &paths_for(Path::new("/images/svg/Foo.svg"), base));

        assert_eq!(jobs.len(), 8);
        assert_eq!(jobs[0].destination, base.join("win/Foo.ico"));
        assert_eq!(
            jobs[1].destination,
            base.join("linux/xdg/icons/hicolor/scalable/apps/Foo.svg")
        );

        let pngs: Vec<PathBuf> = jobs
            .iter()
            .filter(|job| matches!(job.size, IconSize::Pixels(_)))
            .map(|job| job.destination.clone())
            .collect();
        let expected: Vec<PathBuf> = PNG_SIZES
            .iter()
            .map(|n| base.join(format!("linux/xdg/icons/hicolor/{n}x{n}/apps/Foo.png")))
            .collect();
        assert_eq!(pngs, expected);
    }

    #[test]
    fn ico_arguments() {
        let job = IconJob {
            size: IconSize::MultiResolution,
            source: PathBuf::from("app.svg"),
            destination: PathBuf::from("win/app.ico"),
        };
        assert_eq!(
            converter_args(&job).unwrap().join(" "),
            "-density 256x256 -background transparent app.svg -define icon:auto-resize -colors 256 win/app.ico"
        );
    }

    #[test]
    fn png_arguments() {
        let job = IconJob {
            size: IconSize::Pixels(24),
            source: PathBuf::from("app.svg"),
            destination: PathBuf::from("24x24/apps/app.png"),
        };
        assert_eq!(
            converter_args(&job).unwrap().join(" "),
            "-define png:exclude-chunks=all -density 1200 -background transparent -resize 24x24 app.svg 24x24/apps/app.png"
        );
    }

    #[tokio::test]
    async fn creates_directories_and_copies_the_vector_source() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("Foo.svg");
        std::fs::write(&svg, "<svg/>").unwrap();
        let base = dir.path().join("packaging");

        let jobs = plan_icon_jobs("Foo", &paths_for(&svg, &base));
        let mut recorder = Recorder::default();
        let written = generate_icons(&mut recorder, &jobs).await.unwrap();

        assert_eq!(written.len(), 8);
        assert_eq!(recorder.calls.len(), 7);
        assert_eq!(std::fs::read_to_string(&jobs[1].destination).unwrap(), "<svg/>");
        for size in PNG_SIZES {
            assert!(hicolor_dir(&base).join(format!("{size}x{size}/apps")).is_dir());
        }
    }

    #[tokio::test]
    async fn converter_failure_stops_generation() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("Foo.svg");
        std::fs::write(&svg, "<svg/>").unwrap();

        let jobs = plan_icon_jobs("Foo", &paths_for(&svg, dir.path()));
        let mut recorder = Recorder {
            fail_at: Some(2),
            ..Recorder::default()
        };
        let err = generate_icons(&mut recorder, &jobs).await.unwrap_err();

        assert!(matches!(err, ReleaseError::Converter { .. }));
        assert_eq!(recorder.calls.len(), 2);
        assert!(!hicolor_dir(dir.path()).join("32x32").exists());
    }
}
