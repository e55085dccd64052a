//! Refreshes release metadata from `CMakeLists.txt`: the Windows resource
//! script, the Inno Setup defines and the application icons.

pub mod config;
pub mod convert;
pub mod error;
pub mod icons;
pub mod installer;
pub mod pipeline;
pub mod project;
pub mod resource;
pub mod types;

pub use error::ReleaseError;
pub use types::{IconJob, IconSize, ProjectInfo, Version};
