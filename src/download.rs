use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use sha2::{Digest, Sha256};

use crate::InstallerError;

/// Redirect-following bound; release hosts redirect to object storage,
/// but a loop must not hang the install.
pub const MAX_REDIRECTS: usize = 5;

const USER_AGENT: &str = "ailign-installer";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// HTTP client with redirect handling disabled; the bounded loop in
/// [`fetch_to_file`] follows redirects itself.
pub fn client() -> Result<Client, InstallerError> {
    Client::builder()
        .redirect(Policy::none())
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| InstallerError::Download(format!("failed to build HTTP client: {e}")))
}

/// Fetch `url` into `<dest_dir>/<file_name>`, streaming the body to disk
/// and following up to [`MAX_REDIRECTS`] redirects.
///
/// The caller owns the written file and is responsible for removing it.
pub fn fetch_to_file(
    client: &Client,
    url: &str,
    dest_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, InstallerError> {
    let mut current = reqwest::Url::parse(url)
        .map_err(|e| InstallerError::Download(format!("invalid URL {url}: {e}")))?;
    let mut redirects = 0usize;

    loop {
        let mut response = client
            .get(current.clone())
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| InstallerError::Download(format!("request to {current} failed: {e}")))?;

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok());
            let Some(location) = location else {
                return Err(InstallerError::HttpStatus(status.as_u16()));
            };

            redirects += 1;
            if redirects > MAX_REDIRECTS {
                return Err(InstallerError::TooManyRedirects(MAX_REDIRECTS));
            }
            // Location may be relative; resolve it against the current URL.
            current = current.join(location).map_err(|e| {
                InstallerError::Download(format!("invalid redirect target {location}: {e}"))
            })?;
            continue;
        }

        if !status.is_success() {
            return Err(InstallerError::HttpStatus(status.as_u16()));
        }

        let dest = dest_dir.join(file_name);
        let mut file = File::create(&dest).map_err(|e| {
            InstallerError::Download(format!("failed to create {}: {e}", dest.display()))
        })?;
        let written = response.copy_to(&mut file);
        drop(file);
        if let Err(e) = written {
            // Do not leave a partial archive behind.
            let _ = fs::remove_file(&dest);
            return Err(InstallerError::Download(format!(
                "failed to write {}: {e}",
                dest.display()
            )));
        }
        return Ok(dest);
    }
}

/// Compare the file's SHA-256 against `expected` (lowercase or uppercase
/// hex), hashing in fixed-size chunks.
pub fn verify_sha256(path: &Path, expected: &str) -> Result<(), InstallerError> {
    let mut file = File::open(path)
        .map_err(|e| InstallerError::Download(format!("failed to open {}: {e}", path.display())))?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(|e| {
            InstallerError::Download(format!("failed to read {}: {e}", path.display()))
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let actual = hex::encode(hasher.finalize());
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(InstallerError::ChecksumMismatch {
            expected: expected.to_ascii_lowercase(),
            actual,
        })
    }
}
