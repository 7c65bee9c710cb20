use std::fs;
use std::path::{Path, PathBuf};

use crate::config::InstallConfig;
use crate::platform::{self, Platform};
use crate::resolve::{self, Resolved};
use crate::{download, extract, InstallerError};

/// Terminal outcome of an install attempt. Failures degrade to a skip
/// variant carrying the logged warning; none of them fail the host
/// package manager's install.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum InstallResult {
    /// A usable binary already exists; nothing was downloaded.
    AlreadyPresent,
    /// The bundled platform package provides the binary at this path.
    ResolvedViaBundle(PathBuf),
    /// Downloaded, extracted and installed at this path.
    Installed(PathBuf),
    /// The configured version is the unpublished `0.0.0` placeholder.
    SkippedUnpublished,
    /// The running platform has no published binary; carries the key.
    SkippedUnsupportedPlatform(String),
    /// Download, verification or extraction failed; carries the warning.
    SkippedDownloadFailed(String),
}

/// Run the install pipeline to completion. Never returns an error:
/// every failure mode is logged as a warning and mapped to a skip
/// variant so a broken download cannot block the surrounding install.
pub fn run(config: &InstallConfig) -> InstallResult {
    run_with(config, platform::detect())
}

/// Like [`run`], but with the platform detection result supplied by the
/// caller instead of read from the running process.
pub fn run_with(
    config: &InstallConfig,
    platform: Result<Platform, InstallerError>,
) -> InstallResult {
    // An installed bundled package or a cached binary satisfies the
    // install with zero network activity.
    if let Ok(platform) = &platform {
        match resolve::resolve(config, platform) {
            Some(Resolved::Bundled(path)) => return InstallResult::ResolvedViaBundle(path),
            Some(Resolved::Cached(_)) => return InstallResult::AlreadyPresent,
            None => {}
        }
    }

    if config.is_unpublished() {
        return InstallResult::SkippedUnpublished;
    }

    let platform = match platform {
        Ok(platform) => platform,
        Err(e) => {
            eprintln!("ailign: {e}");
            return InstallResult::SkippedUnsupportedPlatform(e.to_string());
        }
    };

    let bin_dir = config.bin_dir();
    if bin_dir.join(platform.binary_name()).exists() {
        return InstallResult::AlreadyPresent;
    }

    match download_and_install(config, &platform, &bin_dir) {
        Ok(path) => {
            println!("ailign: installed to {}", path.display());
            InstallResult::Installed(path)
        }
        Err(e) => {
            let warning = format!(
                "{e}; you can install manually from {}",
                config.manual_install_url()
            );
            eprintln!("ailign: {warning}");
            InstallResult::SkippedDownloadFailed(warning)
        }
    }
}

fn download_and_install(
    config: &InstallConfig,
    platform: &Platform,
    bin_dir: &Path,
) -> Result<PathBuf, InstallerError> {
    fs::create_dir_all(bin_dir).map_err(|e| {
        InstallerError::Download(format!("failed to create {}: {e}", bin_dir.display()))
    })?;

    let url = config.release_url(platform);
    println!("ailign: downloading {url}");

    let client = download::client()?;
    let archive = download::fetch_to_file(
        &client,
        &url,
        bin_dir,
        &platform.archive_name(&config.version),
    )?;

    let result = verify_and_extract(config, platform, bin_dir, &archive);
    // Best-effort cleanup of the temporary archive on every path.
    let _ = fs::remove_file(&archive);
    result
}

fn verify_and_extract(
    config: &InstallConfig,
    platform: &Platform,
    bin_dir: &Path,
    archive: &Path,
) -> Result<PathBuf, InstallerError> {
    if let Some(expected) = &config.expected_sha256 {
        download::verify_sha256(archive, expected)?;
    }
    extract::install_archive(archive, bin_dir, platform)
}
