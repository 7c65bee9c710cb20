use std::fs;
use std::path::{Path, PathBuf};

use crate::platform::Platform;
use crate::InstallerError;

/// Reserved placeholder version meaning "no release published yet".
pub const UNPUBLISHED_VERSION: &str = "0.0.0";

/// Where release archives are published.
pub const DEFAULT_RELEASE_BASE: &str = "https://github.com/ailign-cli/cli";

/// Everything the install pipeline needs, passed explicitly so tests can
/// run against a temporary directory and a mock release host.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Root of the host package; `bin/` and `.cache/` live under it.
    pub package_root: PathBuf,
    /// Directory bundled platform packages are resolved from. `None`
    /// disables the bundled-package probe.
    pub packages_root: Option<PathBuf>,
    /// Version of the release to install.
    pub version: String,
    /// Base URL of the release host.
    pub release_base: String,
    /// Expected SHA-256 of the release archive, when known. `None` skips
    /// verification (upstream publishes no checksums today).
    pub expected_sha256: Option<String>,
}

impl InstallConfig {
    /// Build a config for `package_root`, reading the version from its
    /// `package.json`. Bundled packages are resolved from the parent
    /// directory, matching the host package manager's layout.
    pub fn from_package_root(package_root: &Path) -> Result<Self, InstallerError> {
        let manifest = package_root.join("package.json");
        let text = fs::read_to_string(&manifest).map_err(|e| {
            InstallerError::Metadata(format!("failed to read {}: {e}", manifest.display()))
        })?;
        let meta: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            InstallerError::Metadata(format!("failed to parse {}: {e}", manifest.display()))
        })?;
        let version = meta["version"]
            .as_str()
            .ok_or_else(|| {
                InstallerError::Metadata(format!("{} has no version field", manifest.display()))
            })?
            .to_string();

        Ok(Self {
            package_root: package_root.to_path_buf(),
            packages_root: package_root.parent().map(Path::to_path_buf),
            version,
            release_base: DEFAULT_RELEASE_BASE.to_string(),
            expected_sha256: None,
        })
    }

    /// Canonical install directory for the downloaded binary.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.package_root.join("bin")
    }

    /// Local cache directory probed as a fallback binary location.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.package_root.join(".cache")
    }

    /// Download URL for this version's release archive on `platform`.
    #[must_use]
    pub fn release_url(&self, platform: &Platform) -> String {
        format!(
            "{}/releases/download/v{}/{}",
            self.release_base,
            self.version,
            platform.archive_name(&self.version)
        )
    }

    /// Releases page to point users at when automatic install fails.
    #[must_use]
    pub fn manual_install_url(&self) -> String {
        format!("{}/releases", self.release_base)
    }

    /// Whether the configured version is the unpublished placeholder.
    #[must_use]
    pub fn is_unpublished(&self) -> bool {
        self.version == UNPUBLISHED_VERSION
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::platform;

    fn config(version: &str) -> InstallConfig {
        InstallConfig {
            package_root: PathBuf::from("/pkg/ailign"),
            packages_root: Some(PathBuf::from("/pkg")),
            version: version.to_string(),
            release_base: DEFAULT_RELEASE_BASE.to_string(),
            expected_sha256: None,
        }
    }

    #[test]
    fn from_package_root_reads_version() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("package.json"),
            r#"{"name": "ailign", "version": "1.2.3"}"#,
        )
        .unwrap();

        let config = InstallConfig::from_package_root(tmp.path()).unwrap();
        assert_eq!(config.version, "1.2.3");
        assert_eq!(config.packages_root.as_deref(), tmp.path().parent());
        assert_eq!(config.bin_dir(), tmp.path().join("bin"));
        assert_eq!(config.cache_dir(), tmp.path().join(".cache"));
    }

    #[test]
    fn from_package_root_missing_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let result = InstallConfig::from_package_root(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn from_package_root_missing_version_field() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("package.json"), r#"{"name": "ailign"}"#).unwrap();

        let err = InstallConfig::from_package_root(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("no version field"));
    }

    #[test]
    fn from_package_root_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("package.json"), "not-json").unwrap();

        let err = InstallConfig::from_package_root(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn release_url_follows_template() {
        let platform = platform::from_env("linux", "x86_64").unwrap();
        assert_eq!(
            config("1.2.3").release_url(&platform),
            "https://github.com/ailign-cli/cli/releases/download/v1.2.3/ailign_1.2.3_linux_amd64.tar.gz"
        );
    }

    #[test]
    fn release_url_windows_zip() {
        let platform = platform::from_env("windows", "x86_64").unwrap();
        assert_eq!(
            config("0.4.0").release_url(&platform),
            "https://github.com/ailign-cli/cli/releases/download/v0.4.0/ailign_0.4.0_windows_amd64.zip"
        );
    }

    #[test]
    fn manual_install_url_points_at_releases() {
        assert_eq!(
            config("1.2.3").manual_install_url(),
            "https://github.com/ailign-cli/cli/releases"
        );
    }

    #[test]
    fn unpublished_sentinel() {
        assert!(config("0.0.0").is_unpublished());
        assert!(!config("0.0.1").is_unpublished());
    }
}
