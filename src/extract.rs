use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::platform::Platform;
use crate::InstallerError;

/// Extract the archive at `archive` into `install_dir` and mark the
/// binary executable, returning its final path.
///
/// Dispatches on the platform's archive format: tar.gz archives yield
/// only the binary entry, zip archives are expanded in full.
pub fn install_archive(
    archive: &Path,
    install_dir: &Path,
    platform: &Platform,
) -> Result<PathBuf, InstallerError> {
    let binary_name = platform.binary_name();

    let binary_path = if platform.archive_ext() == "zip" {
        extract_zip(archive, install_dir)?;
        let path = install_dir.join(binary_name);
        if !path.is_file() {
            return Err(InstallerError::Extraction(format!(
                "{binary_name} not found in zip archive"
            )));
        }
        path
    } else {
        extract_tar_gz(archive, install_dir, binary_name)?
    };

    set_executable(&binary_path)?;
    Ok(binary_path)
}

/// Extract only the entry named `binary_name` from a `.tar.gz` archive
/// into `install_dir`, leaving the rest of the archive tree alone.
pub fn extract_tar_gz(
    archive: &Path,
    install_dir: &Path,
    binary_name: &str,
) -> Result<PathBuf, InstallerError> {
    let file = File::open(archive).map_err(|e| {
        InstallerError::Extraction(format!("failed to open {}: {e}", archive.display()))
    })?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);

    for entry in tar
        .entries()
        .map_err(|e| InstallerError::Extraction(format!("failed to read tar entries: {e}")))?
    {
        let mut entry = entry
            .map_err(|e| InstallerError::Extraction(format!("failed to read tar entry: {e}")))?;

        let is_binary = {
            let path = entry.path().map_err(|e| {
                InstallerError::Extraction(format!("failed to read entry path: {e}"))
            })?;
            path.file_name().and_then(|n| n.to_str()) == Some(binary_name)
        };
        if !is_binary {
            continue;
        }

        let dest = install_dir.join(binary_name);
        let mut out = File::create(&dest).map_err(|e| {
            InstallerError::Extraction(format!("failed to create {}: {e}", dest.display()))
        })?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            InstallerError::Extraction(format!("failed to write {}: {e}", dest.display()))
        })?;
        return Ok(dest);
    }

    Err(InstallerError::Extraction(format!(
        "{binary_name} not found in tar.gz archive"
    )))
}

/// Expand a `.zip` archive fully into `install_dir`, overwriting any
/// previously extracted files.
pub fn extract_zip(archive: &Path, install_dir: &Path) -> Result<(), InstallerError> {
    let file = File::open(archive).map_err(|e| {
        InstallerError::Extraction(format!("failed to open {}: {e}", archive.display()))
    })?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| InstallerError::Extraction(format!("failed to open zip archive: {e}")))?;

    zip.extract(install_dir)
        .map_err(|e| InstallerError::Extraction(format!("failed to expand zip archive: {e}")))
}

/// Set owner-write plus read+execute for everyone; archive extraction
/// does not reliably preserve executable bits.
#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), InstallerError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| InstallerError::Permissions(format!("{}: {e}", path.display())))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), InstallerError> {
    Ok(())
}
