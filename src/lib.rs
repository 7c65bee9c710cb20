pub mod config;
pub mod download;
pub mod extract;
mod install;
pub mod platform;
pub mod resolve;

pub use config::InstallConfig;
pub use install::{run_with as install_with, InstallResult};

#[derive(Debug, thiserror::Error)]
pub enum InstallerError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("failed to read package metadata: {0}")]
    Metadata(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("download failed: HTTP {0}")]
    HttpStatus(u16),

    #[error("download failed: more than {0} redirects")]
    TooManyRedirects(usize),

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("failed to set executable permissions on {0}")]
    Permissions(String),
}

/// Run the full install pipeline for the `ailign` binary: probe the
/// bundled platform package and local cache, and otherwise download,
/// verify and extract the release archive into `<package_root>/bin`.
///
/// Never fails: every error degrades to a logged warning and a skip
/// variant of [`InstallResult`].
pub fn install(config: &InstallConfig) -> InstallResult {
    install::run(config)
}
