use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub fn ensure_parent(p: &Path) -> io::Result<()> {
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn write_all(p: &Path, bytes: &[u8]) -> io::Result<()> {
    ensure_parent(p)?;
    fs::write(p, bytes)
}

/// Lit un source ; l’erreur porte le chemin.
pub fn read_source(p: &Path) -> Result<String> {
    fs::read_to_string(p).map_err(|e| Error::InvalidInput(format!("lecture {}: {e}", p.display())))
}

/// Refuse tout fichier dont l’extension n’est pas exactement `ext`.
pub fn check_extension(p: &Path, ext: &str) -> Result<()> {
    match p.extension().and_then(|e| e.to_str()) {
        Some(e) if e == ext => Ok(()),
        _ => Err(Error::InvalidInput(format!("{} : extension `.{ext}` attendue", p.display()))),
    }
}

/// `dir/stem.ext` (ou `parent(input)/stem.ext` sans `dir`).
pub fn sibling_with_ext(input: &Path, dir: Option<&Path>, ext: &str) -> PathBuf {
    let stem = input.file_stem().map_or_else(|| "out".into(), |s| s.to_string_lossy().into_owned());
    let file = if ext.is_empty() { stem } else { format!("{stem}.{ext}") };
    match dir.or_else(|| input.parent()) {
        Some(d) => d.join(file),
        None => PathBuf::from(file),
    }
}
