//! token.rs — Modèle de données partagé entre tokenizer et codegen.
//!
//! Un `Token` = une ligne logique du DSL : la commande (premier mot) et ses
//! arguments dans l’ordre. Le numéro de ligne sert uniquement aux diagnostics.

use std::fmt;

use serde::Serialize;

/// Mots-clés de type reconnus par `let`, `const` et `input`.
pub const TYPE_KEYWORDS: [&str; 9] = [
    "int", "float64", "string", "bool", "rune", "byte", "[]int", "[]string", "[]float64",
];

/// Vrai si `s` est exactement un des [`TYPE_KEYWORDS`].
pub fn is_type_keyword(s: &str) -> bool {
    TYPE_KEYWORDS.contains(&s)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub command: String,
    pub args: Vec<String>,
    /// Ligne physique 1-based (0 si construit à la main).
    pub line: usize,
}

impl Token {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self { command: command.into(), args, line: 0 }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)?;
        for a in &self.args {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_keywords_are_exact() {
        assert!(is_type_keyword("int"));
        assert!(is_type_keyword("[]float64"));
        assert!(!is_type_keyword("Int"));
        assert!(!is_type_keyword("[]bool"));
        assert!(!is_type_keyword("int64"));
    }

    #[test]
    fn display_rebuilds_the_line() {
        let t = Token::new("let", vec!["x".into(), "int".into(), "5".into()]).at_line(3);
        assert_eq!(t.to_string(), "let x int 5");
        assert_eq!(t.line, 3);
    }
}
