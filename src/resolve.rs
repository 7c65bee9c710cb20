use std::path::PathBuf;

use crate::config::InstallConfig;
use crate::platform::Platform;

/// Where an already-usable binary was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Inside a bundled platform package installed by the host package
    /// manager's optional-dependency mechanism.
    Bundled(PathBuf),
    /// In the local cache directory from a previous download.
    Cached(PathBuf),
}

/// Locate a usable binary without side effects, probing the bundled
/// platform package first and the local cache second.
#[must_use]
pub fn resolve(config: &InstallConfig, platform: &Platform) -> Option<Resolved> {
    bundled_binary(config, platform)
        .map(Resolved::Bundled)
        .or_else(|| cached_binary(config, platform).map(Resolved::Cached))
}

/// Expected binary path inside the bundled platform package, if that
/// package is installed. The package's own `package.json` is the
/// presence signal; its absence means "not bundled", never an error.
#[must_use]
pub fn bundled_binary(config: &InstallConfig, platform: &Platform) -> Option<PathBuf> {
    let package = platform.package_name()?;
    let package_dir = config.packages_root.as_ref()?.join(package);

    if !package_dir.join("package.json").is_file() {
        return None;
    }

    Some(package_dir.join("bin").join(platform.binary_name()))
}

/// Previously downloaded binary in the cache directory, returned as-is
/// with no re-verification.
#[must_use]
pub fn cached_binary(config: &InstallConfig, platform: &Platform) -> Option<PathBuf> {
    let path = config.cache_dir().join(platform.binary_name());
    path.is_file().then_some(path)
}
