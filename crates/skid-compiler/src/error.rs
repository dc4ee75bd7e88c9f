use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Chemin illisible, mauvaise extension…
    #[error("entrée invalide: {0}")]
    InvalidInput(String),

    #[error("configuration: {0}")]
    Config(String),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// Mode strict : au moins un diagnostic bloquant.
    #[error("{count} diagnostic(s) bloquant(s):\n{rendered}")]
    Strict { count: usize, rendered: String },

    #[error("impossible de lancer `{bin}`: {source}")]
    ToolchainSpawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("échec de `{bin} build` sur {path} ({status})", path = .file.display())]
    ToolchainFailed { bin: String, file: PathBuf, status: ExitStatus },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
