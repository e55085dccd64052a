use crate::error::ReleaseError;
use std::future::Future;
use tokio::process::Command;
use tracing::debug;

/// An external image conversion tool, invoked once per icon.
pub trait Converter {
    /// Run a single conversion and wait for it to finish.
    fn run(&mut self, args: &[String]) -> impl Future<Output = Result<(), ReleaseError>>;
}

/// ImageMagick's command line front end (`convert`, or `magick` on IM7).
#[derive(Debug, Clone)]
pub struct ImageMagick {
    program: String,
}

impl ImageMagick {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn failure(&self, args: &[String], reason: String) -> ReleaseError {
        ReleaseError::Converter {
            program: self.program.clone(),
            args: args.join(" "),
            reason,
        }
    }
}

impl Converter for ImageMagick {
    async fn run(&mut self, args: &[String]) -> Result<(), ReleaseError> {
        debug!("Running: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| self.failure(args, format!("failed to start: {}", e)))?;

        for line in String::from_utf8_lossy(&output.stderr).lines() {
            if !line.trim().is_empty() {
                debug!("{}: {}", self.program, line);
            }
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(self.failure(args, format!("exited with {}", output.status)))
        }
    }
}
