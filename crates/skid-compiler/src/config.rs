//! config.rs — Configuration du compilateur skid.
//!
//! Couches, de la plus faible à la plus forte :
//! 1. défauts (`Config::default()`)
//! 2. fichier `skid.toml` (`Config::load` / `Config::from_toml_str`)
//! 3. ENV (`Config::apply_env`)
//! 4. overrides CLI (`Config::apply_cli_overrides`)
//!
//! ENV supportés (tous facultatifs) :
//!   SKID_GO_BIN=<chemin du binaire go>
//!   SKID_STRICT=0|1
//!   SKID_KEEP_GO=0|1
//!   SKID_OUT_DIR=<dossier des binaires>
//!
//! Exemple de `skid.toml` :
//! ```toml
//! go_bin = "/usr/local/go/bin/go"
//! strict = true
//! out_dir = "bin"
//! ```

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Nom du fichier de configuration cherché par défaut.
pub const CONFIG_FILE: &str = "skid.toml";

/// Extension imposée aux sources DSL.
pub const SOURCE_EXT: &str = "skid";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Binaire de la toolchain (si absent : `go` dans le PATH).
    pub go_bin: Option<Utf8PathBuf>,
    /// Diagnostics `warning`/`error` → échec de compilation.
    pub strict: bool,
    /// Conserver le `.go` intermédiaire après un build réussi.
    pub keep_intermediate: bool,
    /// Dossier des binaires produits (sinon : à côté du source).
    pub out_dir: Option<Utf8PathBuf>,
}

/// Overrides fournis par une CLI ; `None` = ne touche pas.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub go_bin: Option<Utf8PathBuf>,
    pub strict: Option<bool>,
    pub keep_intermediate: Option<bool>,
    pub out_dir: Option<Utf8PathBuf>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Lit un fichier TOML.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("lecture {path}: {e}")))?;
        let cfg = Self::from_toml_str(&s)?;
        log::debug!("configuration chargée depuis {path}");
        Ok(cfg)
    }

    /// Charge `path` s’il est donné, sinon `skid.toml` dans `dir` s’il existe,
    /// sinon les défauts.
    pub fn discover(path: Option<&Utf8Path>, dir: &Utf8Path) -> Result<Self> {
        if let Some(p) = path {
            return Self::load(p);
        }
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Applique les variables d’environnement `SKID_*`.
    pub fn apply_env(&mut self) {
        self.apply_vars(|k| std::env::var(k).ok());
    }

    fn apply_vars(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("SKID_GO_BIN")  { if !v.trim().is_empty() { self.go_bin = Some(v.trim().into()); } }
        if let Some(v) = get("SKID_STRICT")  { if let Some(b) = parse_bool(&v) { self.strict = b; } }
        if let Some(v) = get("SKID_KEEP_GO") { if let Some(b) = parse_bool(&v) { self.keep_intermediate = b; } }
        if let Some(v) = get("SKID_OUT_DIR") { if !v.trim().is_empty() { self.out_dir = Some(v.trim().into()); } }
    }

    /// Applique des overrides “dernier mot” issus d’une CLI.
    pub fn apply_cli_overrides(&mut self, o: &CliOverrides) {
        if let Some(x) = &o.go_bin            { self.go_bin = Some(x.clone()); }
        if let Some(x) = o.strict             { self.strict = x; }
        if let Some(x) = o.keep_intermediate  { self.keep_intermediate = x; }
        if let Some(x) = &o.out_dir           { self.out_dir = Some(x.clone()); }
    }

    /// Binaire `go` effectif.
    pub fn go_bin(&self) -> &str {
        self.go_bin.as_ref().map_or("go", |p| p.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(&self.go_bin, Some(p) if p.as_str().is_empty()) {
            return Err(Error::Config("go_bin vide".into()));
        }
        if let Some(dir) = &self.out_dir {
            if dir.is_file() {
                return Err(Error::Config(format!("out_dir {dir} est un fichier")));
            }
        }
        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no"  | "n" | "off"=> Some(false),
        _ => None,
    }
}

/* ───────────────────────────── Tests ───────────────────────────── */
