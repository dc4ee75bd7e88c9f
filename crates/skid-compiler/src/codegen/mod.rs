//! codegen — Génération de Go à partir du flux de tokens.
//!
//! Une seule passe, sans retour arrière : chaque token est résolu en
//! [`Command`], puis la règle associée ajoute des lignes au corps de `main`
//! ou aux déclarations de haut niveau. Les lignes mal formées n’émettent rien
//! et laissent un [`Diagnostic`] ; la génération va toujours au bout.

use std::fmt::Write as _;

use crate::command::Command;
use crate::diagnostics::Diagnostic;
use crate::token::Token;

pub mod rules;
pub mod state;

pub use rules::Skip;
pub use state::{BlockKind, GenState, SEED_IMPORT};

/// Résultat d’une passe de génération.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Fichier Go complet (`package main` … `func main() { … }`).
    pub source: String,
    pub imports: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Generator {
    st: GenState,
}

impl Default for Generator {
    fn default() -> Self { Self::new() }
}

impl Generator {
    pub fn new() -> Self { Self { st: GenState::new() } }

    /// Traite un token. N’échoue jamais : les refus deviennent des diagnostics.
    pub fn feed(&mut self, tok: &Token) {
        self.st.line = tok.line;
        let Some(cmd) = Command::from_name(&tok.command) else {
            self.st.command = "";
            self.st.report(
                Diagnostic::warning(format!("commande inconnue `{}` ignorée", tok.command))
                    .for_command(tok.command.as_str()),
            );
            return;
        };
        self.st.command = cmd.name();
        log::trace!("l.{} {cmd} {:?}", tok.line, tok.args);
        if let Err(skip) = apply(cmd, &tok.args, &mut self.st) {
            self.st.report(Diagnostic::warning(format!("ligne ignorée : {skip}")));
        }
    }

    pub fn finish(mut self) -> Generated {
        self.st.finish();
        let source = assemble(&self.st);
        Generated {
            source,
            imports: self.st.imports.iter().cloned().collect(),
            diagnostics: self.st.diagnostics,
        }
    }
}

/// Tokens → Go.
pub fn generate(tokens: &[Token]) -> Generated {
    let mut g = Generator::new();
    for t in tokens {
        g.feed(t);
    }
    g.finish()
}

fn apply(cmd: Command, args: &[String], st: &mut GenState) -> rules::Outcome {
    let need = cmd.min_args();
    if args.len() < need {
        return Err(Skip::TooFewArgs { need, got: args.len() });
    }
    match cmd {
        Command::Print => rules::print(args, st),
        Command::Printf => rules::printf(args, st),
        Command::Let => rules::let_(args, st),
        Command::Set => rules::set(args, st),
        Command::If => rules::if_(args, st),
        Command::Else => rules::else_(args, st),
        Command::End => rules::end(args, st),
        Command::While => rules::while_(args, st),
        Command::For => rules::for_(args, st),
        Command::Func => rules::func(args, st),
        Command::EndFunc => rules::end_func(args, st),
        Command::Call => rules::call(args, st),
        Command::Return => rules::return_(args, st),
        Command::Input => rules::input(args, st),
        Command::Switch => rules::switch(args, st),
        Command::Case => rules::case(args, st),
        Command::Default => rules::default(args, st),
        Command::EndSwitch => rules::end_switch(args, st),
        Command::Try => rules::try_(args, st),
        Command::Catch => rules::catch(args, st),
        Command::EndTry => rules::end_try(args, st),
        Command::Struct => rules::struct_(args, st),
        Command::Field => rules::field(args, st),
        Command::EndStruct => rules::end_struct(args, st),
        Command::Inc => rules::inc(args, st),
        Command::Dec => rules::dec(args, st),
        Command::Const => rules::const_(args, st),
        Command::Import => rules::import(args, st),
    }
}

/// Assemble l’en-tête, les imports (triés), le haut niveau puis `main`.
fn assemble(st: &GenState) -> String {
    let mut s = String::from("package main\n\nimport (\n");
    for pkg in &st.imports {
        let _ = writeln!(s, "\t\"{pkg}\"");
    }
    s.push_str(")\n\n");
    for line in &st.top_level {
        s.push_str(line);
        s.push('\n');
    }
    if !st.top_level.is_empty() {
        s.push('\n');
    }
    s.push_str("func main() {\n");
    for line in &st.main_body {
        s.push_str(line);
        s.push('\n');
    }
    s.push_str("}\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::lex;

    fn go(src: &str) -> Generated {
        generate(&lex(src))
    }

    #[test]
    fn empty_program() {
        let g = go("");
        assert_eq!(g.source, "package main\n\nimport (\n\t\"fmt\"\n)\n\nfunc main() {\n}\n");
        assert!(g.diagnostics.is_empty());
    }

    #[test]
    fn unknown_command_is_ignored_with_warning() {
        let g = go("frobnicate 1 2\nprint 1");
        assert!(g.source.contains("\tfmt.Println(1)\n"));
        assert!(!g.source.contains("frobnicate"));
        assert_eq!(g.diagnostics.len(), 1);
        assert_eq!(g.diagnostics[0].line, Some(1));
        assert_eq!(g.diagnostics[0].command.as_deref(), Some("frobnicate"));
    }

    #[test]
    fn too_few_args_reports_line_and_command() {
        let g = go("print 1\nset x");
        assert_eq!(g.diagnostics.len(), 1);
        let d = &g.diagnostics[0];
        assert_eq!((d.line, d.command.as_deref()), (Some(2), Some("set")));
        assert!(!g.source.contains("x ="));
    }

    #[test]
    fn imports_are_sorted_and_unique() {
        let g = go("import strings\nimport os\nimport strings");
        assert_eq!(g.imports, ["fmt", "os", "strings"]);
        assert!(g.source.contains("import (\n\t\"fmt\"\n\t\"os\"\n\t\"strings\"\n)\n"));
    }

    #[test]
    fn generator_is_incremental() {
        let mut g = Generator::new();
        g.feed(&Token::new("let", vec!["x".into(), "1".into()]));
        g.feed(&Token::new("inc", vec!["x".into()]));
        let out = g.finish();
        assert!(out.source.ends_with("\tx := 1\n\tx++\n}\n"));
    }
}
