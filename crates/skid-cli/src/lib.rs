//! skid-cli/src/lib.rs — CLI `skidc`
//!
//! Sous-commandes :
//!   - build  : `.skid` → Go → binaire natif (via `go build`)
//!   - emit   : `.skid` → Go (stdout ou `-o fichier.go`)
//!   - tokens : dump du flux de tokens (texte ou `--json`)
//!   - check  : diagnostics seuls ; échec si un diagnostic est bloquant
//!
//! Configuration : défauts < `skid.toml` (ou `--config`) < ENV `SKID_*` < flags.

use std::fs;

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use skid_compiler::{diagnostics, CliOverrides, Compiler, Config};

/// Point d’entrée du binaire. `Ok(false)` = commande terminée mais en échec
/// (diagnostics bloquants pour `check`).
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);
    execute(cli)
}

#[derive(Parser, Debug)]
#[command(name = "skidc", version, about = "Transpileur du DSL skid vers Go")]
struct Cli {
    /// Plus de logs (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Erreurs seulement
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Fichier de configuration (défaut : `skid.toml` s’il existe)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<Utf8PathBuf>,
    /// Binaire `go` à utiliser
    #[arg(long, global = true, value_name = "PATH")]
    go_bin: Option<Utf8PathBuf>,
    /// Warnings → échec
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compile jusqu’au binaire natif et affiche son chemin
    Build {
        input: Utf8PathBuf,
        /// Dossier des binaires produits
        #[arg(long, value_name = "DIR")]
        out_dir: Option<Utf8PathBuf>,
        /// Conserver le `.go` intermédiaire
        #[arg(long)]
        keep_go: bool,
    },
    /// Affiche (ou écrit) le Go généré
    Emit {
        input: Utf8PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<Utf8PathBuf>,
    },
    /// Affiche les tokens
    Tokens {
        input: Utf8PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Affiche les diagnostics sans rien produire
    Check { input: Utf8PathBuf },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut o = CliOverrides {
            go_bin: self.go_bin.clone(),
            strict: self.strict.then_some(true),
            ..CliOverrides::default()
        };
        if let Cmd::Build { out_dir, keep_go, .. } = &self.cmd {
            o.out_dir = out_dir.clone();
            o.keep_intermediate = keep_go.then_some(true);
        }
        o
    }
}

fn init_logger(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    // RUST_LOG, s’il est défini, complète le niveau choisi par les flags.
    let _ = env_logger::Builder::new().filter_level(level).parse_default_env().try_init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("répertoire courant non UTF-8: {}", p.display()))?;
    let mut cfg = Config::discover(cli.config.as_deref(), &cwd).context("chargement de la configuration")?;
    cfg.apply_env();
    cfg.apply_cli_overrides(&cli.overrides());
    cfg.validate()?;
    log::debug!("configuration: {cfg:?}");
    Ok(cfg)
}

/// Exécute une ligne de commande déjà parsée.
fn execute(cli: Cli) -> Result<bool> {
    let cfg = resolve_config(&cli)?;
    dispatch(&cli, cfg)
}

/// Lance la sous-commande avec une configuration déjà résolue.
fn dispatch(cli: &Cli, cfg: Config) -> Result<bool> {
    let compiler = Compiler::new(cfg);
    match &cli.cmd {
        Cmd::Build { input, .. } => cmd_build(&compiler, input),
        Cmd::Emit { input, output } => cmd_emit(&compiler, input, output.as_deref()),
        Cmd::Tokens { input, json } => cmd_tokens(&compiler, input, *json),
        Cmd::Check { input } => cmd_check(&compiler, input),
    }
}

fn cmd_build(compiler: &Compiler, input: &Utf8Path) -> Result<bool> {
    let product = compiler
        .build_file(input.as_std_path())
        .with_context(|| format!("build de {input}"))?;
    println!("{}", product.binary.display());
    Ok(true)
}

fn cmd_emit(compiler: &Compiler, input: &Utf8Path, output: Option<&Utf8Path>) -> Result<bool> {
    let product = compiler.compile_file(input.as_std_path())?;
    match output {
        Some(out) => {
            fs::write(out, &product.go_source).with_context(|| format!("écriture {out}"))?;
            log::info!("Go écrit → {out}");
        }
        None => print!("{}", product.go_source),
    }
    Ok(true)
}

fn cmd_tokens(compiler: &Compiler, input: &Utf8Path, json: bool) -> Result<bool> {
    let tokens = compiler.tokenize_file(input.as_std_path())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for t in &tokens {
            println!("{:>4}  {t}", t.line);
        }
    }
    Ok(true)
}

fn cmd_check(compiler: &Compiler, input: &Utf8Path) -> Result<bool> {
    let product = compiler.compile_file(input.as_std_path())?;
    if product.diags.is_empty() {
        eprintln!("{input}: aucun diagnostic ({} token(s))", product.tokens);
    } else {
        println!("{}", diagnostics::render(&product.diags));
    }
    Ok(!product.diags.iter().any(|d| d.is_blocking()))
}

/* ───────────────────────────── Tests ───────────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("skidc").chain(args.iter().copied())).unwrap()
    }

    /// Défauts + flags seulement : ni `skid.toml` ni `SKID_*`.
    fn run_isolated(args: &[&str]) -> Result<bool> {
        let cli = parse(args);
        let mut cfg = Config::default();
        cfg.apply_cli_overrides(&cli.overrides());
        dispatch(&cli, cfg)
    }

    fn source(dir: &tempfile::TempDir, name: &str, text: &str) -> Utf8PathBuf {
        let p = Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap();
        fs::write(&p, text).unwrap();
        p
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = parse(&["emit", "a.skid", "-vv", "--strict"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.strict);
        assert!(matches!(cli.cmd, Cmd::Emit { ref input, output: None } if input == "a.skid"));
    }

    #[test]
    fn build_flags_become_overrides() {
        let cli = parse(&["--go-bin", "/opt/go/bin/go", "build", "x.skid", "--out-dir", "bin", "--keep-go"]);
        let o = cli.overrides();
        assert_eq!(o.go_bin.as_deref(), Some(Utf8Path::new("/opt/go/bin/go")));
        assert_eq!(o.out_dir.as_deref(), Some(Utf8Path::new("bin")));
        assert_eq!(o.keep_intermediate, Some(true));
        assert_eq!(o.strict, None);
    }

    #[test]
    fn unset_flags_do_not_override() {
        let o = parse(&["check", "x.skid"]).overrides();
        assert!(o.go_bin.is_none() && o.strict.is_none() && o.keep_intermediate.is_none());
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["skidc", "tokens"]).is_err());
        assert!(Cli::try_parse_from(["skidc", "run", "a.skid"]).is_err());
    }

    #[test]
    fn emit_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = source(&dir, "hello.skid", "let x int 5\nprint x\n");
        let out = Utf8PathBuf::from_path_buf(dir.path().join("hello.go")).unwrap();
        let ok = run_isolated(&["emit", input.as_str(), "-o", out.as_str()]).unwrap();
        assert!(ok);
        let go = fs::read_to_string(&out).unwrap();
        assert!(go.contains("\tvar x int = 5\n\tfmt.Println(x)\n"));
    }

    #[test]
    fn check_fails_on_warnings_only() {
        let dir = tempfile::tempdir().unwrap();
        let clean = source(&dir, "clean.skid", "print 1\n");
        let dirty = source(&dir, "dirty.skid", "print 1\nendswitch\n");
        assert!(run_isolated(&["check", clean.as_str()]).unwrap());
        assert!(!run_isolated(&["check", dirty.as_str()]).unwrap());
    }

    #[test]
    fn exported_skid_vars_do_not_leak_into_commands() {
        let dir = tempfile::tempdir().unwrap();
        let dirty = source(&dir, "dirty.skid", "let x int\n");
        std::env::set_var("SKID_STRICT", "1");
        let res = run_isolated(&["check", dirty.as_str()]);
        std::env::remove_var("SKID_STRICT");
        assert!(!res.unwrap());
    }

    #[test]
    fn strict_turns_warnings_into_errors() {
        let dir = tempfile::tempdir().unwrap();
        let dirty = source(&dir, "dirty.skid", "let x int\n");
        assert!(run_isolated(&["--strict", "emit", dirty.as_str()]).is_err());
    }

    #[test]
    fn wrong_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = source(&dir, "hello.txt", "print 1\n");
        let err = run_isolated(&["tokens", p.as_str()]).unwrap_err();
        assert!(format!("{err:#}").contains(".skid"), "{err:#}");
    }
}
