use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that end the program before or after the picker runs.
#[derive(Error, Debug)]
pub enum AppError {
    /// No `--config` given and no home directory to find `~/.ssh/config` in.
    #[error("could not determine home directory (HOME is not set); pass --config <path>")]
    NoHomeDir,

    #[error("failed to read SSH config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No SSH connections found in {}", path.display())]
    NoConnections { path: PathBuf },

    #[error("failed to write command to stdout: {0}")]
    Output(#[source] io::Error),

    #[error("exec ssh failed: {0}")]
    Launch(#[source] io::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl AppError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Launch(_) => 127,
            AppError::NoConnections { .. } => 1,
            AppError::NoHomeDir
            | AppError::ConfigRead { .. }
            | AppError::Output(_)
            | AppError::Terminal(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
