use std::path::{Path, PathBuf};

use crate::backends::go_build::GoBuild;
use crate::codegen;
use crate::config::{Config, SOURCE_EXT};
use crate::diagnostics::{self, Diagnostic, Severity};
use crate::error::{Error, Result};
use crate::token::Token;
use crate::tokenizer;
use crate::util::fs;

/// Source Go générée (+ diagnostics).
#[derive(Debug, Clone)]
pub struct CompileProduct {
    pub go_source: String,
    pub tokens: usize,
    pub diags: Vec<Diagnostic>,
}

/// Binaire produit par la toolchain (+ diagnostics de génération).
#[derive(Debug, Clone)]
pub struct BuildProduct {
    pub binary: PathBuf,
    pub diags: Vec<Diagnostic>,
}

/// Orchestrateur principal : tokenize → codegen → (toolchain).
pub struct Compiler {
    cfg: Config,
}

impl Compiler {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Tokens d’un fichier `.skid`.
    pub fn tokenize_file(&self, input: &Path) -> Result<Vec<Token>> {
        fs::check_extension(input, SOURCE_EXT)?;
        Ok(tokenizer::lex(&fs::read_source(input)?))
    }

    /// Compile une chaîne en Go. `file` sert uniquement aux diagnostics.
    pub fn compile_str(&self, source: &str, file: Option<&str>) -> Result<CompileProduct> {
        let tokens = tokenizer::lex(source);
        let out = codegen::generate(&tokens);
        let diags: Vec<Diagnostic> = match file {
            Some(f) => out.diagnostics.into_iter().map(|d| d.in_file(f)).collect(),
            None => out.diagnostics,
        };
        for d in &diags {
            match d.severity {
                Severity::Info => log::info!("{d}"),
                Severity::Warning => log::warn!("{d}"),
            }
        }
        if self.cfg.strict {
            bail_if_blocking(&diags)?;
        }
        log::debug!("{} token(s) → {} octet(s) de Go", tokens.len(), out.source.len());
        Ok(CompileProduct { go_source: out.source, tokens: tokens.len(), diags })
    }

    /// Compile un fichier `.skid` en Go.
    pub fn compile_file(&self, input: &Path) -> Result<CompileProduct> {
        fs::check_extension(input, SOURCE_EXT)?;
        let src = fs::read_source(input)?;
        self.compile_str(&src, Some(&input.display().to_string()))
    }

    /// Compile un fichier `.skid` jusqu’au binaire natif.
    pub fn build_file(&self, input: &Path) -> Result<BuildProduct> {
        self.cfg.validate()?;
        let product = self.compile_file(input)?;
        let binary = GoBuild::new(&self.cfg).build(&product.go_source, input)?;
        Ok(BuildProduct { binary, diags: product.diags })
    }
}

fn bail_if_blocking(diags: &[Diagnostic]) -> Result<()> {
    let blocking: Vec<Diagnostic> = diags.iter().filter(|d| d.is_blocking()).cloned().collect();
    if blocking.is_empty() {
        return Ok(());
    }
    Err(Error::Strict { count: blocking.len(), rendered: diagnostics::render(&blocking) })
}
