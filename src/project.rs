use crate::error::ReleaseError;
use crate::types::{ProjectInfo, Version};
use regex::{Captures, Regex};
use std::path::Path;
use tracing::debug;

const PROJECT_PATTERN: &str =
    r"project\s*\(\s*(?P<name>\w+)\s+VERSION\s+(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)";
const APP_NAME_PATTERN: &str = r#"set\s*\(\s*APP_NAME\s+"(?P<value>[^"]+)"\s*\)"#;
const APP_URL_PATTERN: &str = r#"set\s*\(\s*APP_URL\s+"(?P<value>[^"]+)"\s*\)"#;

/// Read `path` and extract the release metadata from it.
pub async fn read_project_info(path: &Path) -> Result<ProjectInfo, ReleaseError> {
    debug!("Reading build configuration {}", path.display());
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(ReleaseError::io("read", path))?;
    parse_project_info(&contents)
}

/// Extract project name, version, app name and app URL from CMake source.
///
/// Only the three declarations below are recognised; the rest of the file is
/// ignored:
///
/// ```cmake
/// project(Foo VERSION 1.2.3 ...)
/// set(APP_NAME "FooApp")
/// set(APP_URL "https://example.com")
/// ```
pub fn parse_project_info(contents: &str) -> Result<ProjectInfo, ReleaseError> {
    let project =
        capture(PROJECT_PATTERN, contents)?.ok_or(ReleaseError::MissingField("Project info"))?;
    let name =
        capture(APP_NAME_PATTERN, contents)?.ok_or(ReleaseError::MissingField("Name info"))?;
    let url =
        capture(APP_URL_PATTERN, contents)?.ok_or(ReleaseError::MissingField("Url info"))?;

    Ok(ProjectInfo {
        project_name: project["name"].to_string(),
        version: Version {
            major: parse_component(&project["major"])?,
            minor: parse_component(&project["minor"])?,
            patch: parse_component(&project["patch"])?,
        },
        app_name: name["value"].to_string(),
        app_url: url["value"].to_string(),
    })
}

fn capture<'t>(pattern: &str, text: &'t str) -> Result<Option<Captures<'t>>, ReleaseError> {
    Ok(Regex::new(pattern)?.captures(text))
}

fn parse_component(digits: &str) -> Result<u32, ReleaseError> {
    digits
        .parse()
        .map_err(|_| ReleaseError::InvalidVersion(digits.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMAKE: &str = r#"cmake_minimum_required(VERSION 3.16)

project(Foo VERSION 1.2.3 LANGUAGES CXX)

set(APP_NAME "FooApp")
set(APP_URL "https://example.com")
"#;

    #[test]
    fn parses_all_fields() {
        let info = parse_project_info(CMAKE).unwrap();
        assert_eq!(
            info,
            ProjectInfo {
                project_name: "Foo".to_string(),
                version: Version {
                    major: 1,
                    minor: 2,
                    patch: 3,
                },
                app_name: "FooApp".to_string(),
                app_url: "https://example.com".to_string(),
            }
        );
    }

    #[test]
    fn tolerates_whitespace_inside_declarations() {
        let cmake = concat!(
            "project ( qlogexplorer\n    VERSION 1.0.12 )\n",
            "set ( APP_NAME  \"QLogExplorer\" )\n",
            "set(APP_URL \"https://github.com/rafaelfassi/qlogexplorer\"   )",
        );
        let info = parse_project_info(cmake).unwrap();
        assert_eq!(info.project_name, "qlogexplorer");
        assert_eq!(info.version.to_string(), "1.0.12");
        assert_eq!(info.app_name, "QLogExplorer");
        assert_eq!(info.app_url, "https://github.com/rafaelfassi/qlogexplorer");
    }

    #[test]
    fn missing_project_declaration() {
        let cmake = CMAKE.replace("project(Foo VERSION 1.2.3", "project(Foo");
        let err = parse_project_info(&cmake).unwrap_err();
        assert!(matches!(err, ReleaseError::MissingField("Project info")));
    }

    #[test]
    fn missing_app_name() {
        let cmake = CMAKE.replace("set(APP_NAME \"FooApp\")", "");
        let err = parse_project_info(&cmake).unwrap_err();
        assert!(matches!(err, ReleaseError::MissingField("Name info")));
    }

    #[test]
    fn missing_url_is_checked_against_the_url_declaration() {
        let cmake = CMAKE.replace("set(APP_URL \"https://example.com\")", "");
        let err = parse_project_info(&cmake).unwrap_err();
        assert!(matches!(err, ReleaseError::MissingField("Url info")));
    }

    #[test]
    fn empty_quoted_value_does_not_count() {
        let cmake = CMAKE.replace("\"FooApp\"", "\"\"");
        assert!(matches!(
            parse_project_info(&cmake),
            Err(ReleaseError::MissingField("Name info"))
        ));
    }

    #[test]
    fn oversized_version_component_is_rejected() {
        let cmake = CMAKE.replace("1.2.3", "1.99999999999.3");
        let err = parse_project_info(&cmake).unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidVersion(ref v) if v == "99999999999"));
    }
}
