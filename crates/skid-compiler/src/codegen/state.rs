//! state.rs — État de génération, possédé par un seul `Generator`.

use std::collections::BTreeSet;
use std::fmt;

use crate::diagnostics::Diagnostic;

/// Paquet Go toujours importé (support de `print`/`printf`/`input`).
pub const SEED_IMPORT: &str = "fmt";

/// Genre de bloc ouvert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind { If, While, For, Switch, Try, Func, Struct }

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockKind::If => "if",
            BlockKind::While => "while",
            BlockKind::For => "for",
            BlockKind::Switch => "switch",
            BlockKind::Try => "try",
            BlockKind::Func => "func",
            BlockKind::Struct => "struct",
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenBlock {
    pub kind: BlockKind,
    pub line: usize,
    /// `try` seulement : un `catch` a déjà été émis.
    pub caught: bool,
}

#[derive(Debug)]
pub struct GenState {
    pub imports: BTreeSet<String>,
    pub main_body: Vec<String>,
    pub top_level: Vec<String>,
    pub current_struct: Option<String>,
    pub(crate) blocks: Vec<OpenBlock>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Ligne du token en cours (diagnostics).
    pub(crate) line: usize,
    /// Nom de la commande en cours (diagnostics).
    pub(crate) command: &'static str,
}

impl Default for GenState {
    fn default() -> Self { Self::new() }
}

impl GenState {
    pub fn new() -> Self {
        Self {
            imports: BTreeSet::from([SEED_IMPORT.to_string()]),
            main_body: Vec::new(),
            top_level: Vec::new(),
            current_struct: None,
            blocks: Vec::new(),
            diagnostics: Vec::new(),
            line: 0,
            command: "",
        }
    }

    pub fn emit_main(&mut self, line: impl Into<String>) { self.main_body.push(line.into()); }
    pub fn emit_top(&mut self, line: impl Into<String>) { self.top_level.push(line.into()); }

    /// Diagnostic localisé sur le token courant.
    pub(crate) fn report(&mut self, d: Diagnostic) {
        let d = d.at_line(self.line);
        let d = if self.command.is_empty() { d } else { d.for_command(self.command) };
        self.diagnostics.push(d);
    }

    /* ───────────── Pile des blocs ───────────── */

    pub(crate) fn open(&mut self, kind: BlockKind) {
        self.blocks.push(OpenBlock { kind, line: self.line, caught: false });
    }

    /// Bloc le plus interne.
    pub(crate) fn innermost(&self) -> Option<BlockKind> { self.blocks.last().map(|b| b.kind) }

    /// Vérifie que le bloc le plus interne est de l’un des genres attendus
    /// (sans le fermer : `else`, `case`, `default`, `catch`).
    pub(crate) fn expect_inside(&mut self, kinds: &[BlockKind]) -> bool {
        match self.innermost() {
            Some(k) if kinds.contains(&k) => true,
            Some(k) => {
                self.report(Diagnostic::warning(format!(
                    "attendu dans un bloc {}, trouvé dans `{k}`", list(kinds)
                )));
                false
            }
            None => {
                self.report(Diagnostic::warning(format!("hors de tout bloc {}", list(kinds))));
                false
            }
        }
    }

    /// Ferme le bloc attendu le plus proche. Les blocs plus internes encore
    /// ouverts sont signalés et abandonnés. `None` si aucun bloc attendu n’est ouvert.
    pub(crate) fn close(&mut self, kinds: &[BlockKind]) -> Option<OpenBlock> {
        let Some(pos) = self.blocks.iter().rposition(|b| kinds.contains(&b.kind)) else {
            self.report(Diagnostic::warning(format!("aucun bloc {} ouvert", list(kinds))));
            return None;
        };
        let dangling: Vec<OpenBlock> = self.blocks.drain(pos + 1..).collect();
        for b in dangling.into_iter().rev() {
            self.report(Diagnostic::warning(format!(
                "bloc `{}` ouvert ligne {} jamais fermé", b.kind, b.line
            )));
        }
        self.blocks.pop()
    }

    /// Marque le `try` ouvert le plus proche (même sous un autre bloc) comme
    /// ayant son `catch`.
    pub(crate) fn mark_caught(&mut self) {
        if let Some(b) = self.blocks.iter_mut().rev().find(|b| b.kind == BlockKind::Try) {
            b.caught = true;
        }
    }

    /// `catch` déjà vu pour le `try` ouvert le plus proche ? `None` hors `try`.
    pub(crate) fn nearest_try_caught(&self) -> Option<bool> {
        self.blocks.iter().rev().find(|b| b.kind == BlockKind::Try).map(|b| b.caught)
    }

    /// Fin de passe : signale les blocs restés ouverts.
    pub(crate) fn finish(&mut self) {
        self.line = 0;
        self.command = "";
        let open: Vec<OpenBlock> = std::mem::take(&mut self.blocks);
        for b in open {
            self.diagnostics.push(
                Diagnostic::warning(format!("bloc `{}` non fermé en fin de fichier", b.kind))
                    .at_line(b.line),
            );
        }
    }
}

fn list(kinds: &[BlockKind]) -> String {
    kinds.iter().map(|k| format!("`{k}`")).collect::<Vec<_>>().join("/")
}
