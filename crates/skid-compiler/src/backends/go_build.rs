use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::util::fs;

/// Backend qui appelle `go build` sur le fichier Go intermédiaire.
#[derive(Debug, Clone)]
pub struct GoBuild {
    bin: String,
    out_dir: Option<PathBuf>,
    keep_intermediate: bool,
}

impl GoBuild {
    pub fn new(cfg: &Config) -> Self {
        Self {
            bin: cfg.go_bin().to_string(),
            out_dir: cfg.out_dir.as_ref().map(|d| d.as_std_path().to_path_buf()),
            keep_intermediate: cfg.keep_intermediate,
        }
    }

    /// Chemin du binaire produit pour `input` sur la plateforme courante.
    pub fn binary_path(&self, input: &Path) -> PathBuf {
        binary_path_for(input, self.out_dir.as_deref(), cfg!(windows))
    }

    /// Chemin du `.go` intermédiaire (à côté du binaire).
    pub fn intermediate_path(&self, input: &Path) -> PathBuf {
        fs::sibling_with_ext(input, self.out_dir.as_deref(), "go")
    }

    /// Écrit `<stem>.go`, lance la toolchain, retire l’intermédiaire.
    /// Retourne le chemin du binaire.
    pub fn build(&self, go_source: &str, input: &Path) -> Result<PathBuf> {
        let go_file = self.intermediate_path(input);
        let binary = self.binary_path(input);
        fs::write_all(&go_file, go_source.as_bytes())?;
        fs::ensure_parent(&binary)?;
        log::info!("{} build -o {} {}", self.bin, binary.display(), go_file.display());

        let status = Command::new(&self.bin)
            .arg("build")
            .arg("-o")
            .arg(&binary)
            .arg(&go_file)
            .status()
            .map_err(|source| Error::ToolchainSpawn { bin: self.bin.clone(), source })?;
        if !status.success() {
            log::warn!("intermédiaire conservé: {}", go_file.display());
            return Err(Error::ToolchainFailed { bin: self.bin.clone(), file: go_file, status });
        }

        if self.keep_intermediate {
            log::debug!("intermédiaire conservé: {}", go_file.display());
        } else {
            std::fs::remove_file(&go_file)?;
        }
        Ok(binary)
    }
}

/// `<dir|parent>/<stem>` + `.exe` sous Windows.
pub fn binary_path_for(input: &Path, out_dir: Option<&Path>, windows: bool) -> PathBuf {
    fs::sibling_with_ext(input, out_dir, if windows { "exe" } else { "" })
}
