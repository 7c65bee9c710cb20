use std::path::PathBuf;
use std::process::ExitCode;

use ailign_installer::InstallConfig;

// The exit code is always 0: a failed binary download must never fail
// the package installation that invoked us.
fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut package_root = PathBuf::from(".");
    let mut expected_sha256 = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--root" if i + 1 < args.len() => {
                package_root = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--sha256" if i + 1 < args.len() => {
                expected_sha256 = Some(args[i + 1].clone());
                i += 2;
            }
            _ => i += 1,
        }
    }

    match InstallConfig::from_package_root(&package_root) {
        Ok(mut config) => {
            config.expected_sha256 = expected_sha256;
            let _ = ailign_installer::install(&config);
        }
        Err(e) => eprintln!("ailign: {e}"),
    }

    ExitCode::SUCCESS
}
