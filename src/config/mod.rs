//! Startup Configuration
//!
//! The server has almost nothing to configure: it listens on the loopback
//! interface and keeps its data file and web root next to the executable.
//! Both locations are resolved once at startup into [`Paths`]; tests and
//! the `--base-dir` flag point them somewhere else.

use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

use crate::{DEFAULT_HOST, DEFAULT_PORT};

/// Name of the persistent key/value file inside the base directory.
pub const CONFIG_FILE_NAME: &str = "config.txt";

/// Name of the static web root inside the base directory.
pub const WWW_DIR_NAME: &str = "www";

/// Command-line arguments of the `getset` binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "getset", version, about = "Key/value command server")]
pub struct ServerArgs {
    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding config.txt and www/ (default: the executable's directory)
    #[arg(long, env = "GETSET_BASE_DIR")]
    pub base_dir: Option<PathBuf>,
}

impl ServerArgs {
    /// Returns the bind address as a string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the data and web paths, honoring `--base-dir`.
    pub fn paths(&self) -> io::Result<Paths> {
        match &self.base_dir {
            Some(dir) => Ok(Paths::new(dir)),
            None => Paths::from_exe(),
        }
    }
}

/// Absolute locations derived from one base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub base_dir: PathBuf,
    pub config_file: PathBuf,
    pub www_dir: PathBuf,
}

impl Paths {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        Self {
            config_file: base_dir.join(CONFIG_FILE_NAME),
            www_dir: base_dir.join(WWW_DIR_NAME),
            base_dir,
        }
    }

    /// Uses the directory of the running executable.
    pub fn from_exe() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("executable path has no parent: {}", exe.display()),
            )
        })?;
        Ok(Self::new(dir))
    }
}
