use crate::InstallerError;

/// Operating systems a prebuilt `ailign` binary is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
}

/// CPU architectures a prebuilt `ailign` binary is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
}

impl Os {
    /// Token used in platform keys and bundled package names.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Windows => "win32",
        }
    }

    /// Token used in release archive file names.
    #[must_use]
    pub const fn artifact(self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Windows => "windows",
        }
    }
}

impl Arch {
    /// Token used in platform keys and bundled package names.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
        }
    }

    /// Token used in release archive file names.
    #[must_use]
    pub const fn artifact(self) -> &'static str {
        match self {
            Self::X64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

/// The running OS and CPU architecture, derived once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Canonical `<os>-<arch>` key, e.g. `darwin-arm64`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}", self.os.key(), self.arch.key())
    }

    /// Name of the bundled platform package carrying a prebuilt binary,
    /// or `None` when no such package is published for this platform.
    #[must_use]
    pub const fn package_name(&self) -> Option<&'static str> {
        match (self.os, self.arch) {
            (Os::Darwin, Arch::Arm64) => Some("@ailign/cli-darwin-arm64"),
            (Os::Darwin, Arch::X64) => Some("@ailign/cli-darwin-x64"),
            (Os::Linux, Arch::X64) => Some("@ailign/cli-linux-x64"),
            (Os::Linux, Arch::Arm64) => Some("@ailign/cli-linux-arm64"),
            (Os::Windows, Arch::X64) => Some("@ailign/cli-win32-x64"),
            (Os::Windows, Arch::Arm64) => None,
        }
    }

    #[must_use]
    pub const fn binary_name(&self) -> &'static str {
        match self.os {
            Os::Windows => "ailign.exe",
            Os::Darwin | Os::Linux => "ailign",
        }
    }

    #[must_use]
    pub const fn archive_ext(&self) -> &'static str {
        match self.os {
            Os::Windows => "zip",
            Os::Darwin | Os::Linux => "tar.gz",
        }
    }

    /// Release archive file name, e.g. `ailign_1.2.3_linux_amd64.tar.gz`.
    #[must_use]
    pub fn archive_name(&self, version: &str) -> String {
        format!(
            "ailign_{version}_{}_{}.{}",
            self.os.artifact(),
            self.arch.artifact(),
            self.archive_ext()
        )
    }
}

/// Detect the running platform from the compile-time OS/arch constants.
pub fn detect() -> Result<Platform, InstallerError> {
    from_env(std::env::consts::OS, std::env::consts::ARCH)
}

/// Map Rust OS/arch names to a [`Platform`], or signal an unsupported pair.
pub fn from_env(os: &str, arch: &str) -> Result<Platform, InstallerError> {
    let os_token = match os {
        "macos" => Some(Os::Darwin),
        "linux" => Some(Os::Linux),
        "windows" => Some(Os::Windows),
        _ => None,
    };
    let arch_token = match arch {
        "x86_64" => Some(Arch::X64),
        "aarch64" => Some(Arch::Arm64),
        _ => None,
    };

    match (os_token, arch_token) {
        (Some(os), Some(arch)) => Ok(Platform { os, arch }),
        _ => Err(InstallerError::UnsupportedPlatform(format!("{os}-{arch}"))),
    }
}
