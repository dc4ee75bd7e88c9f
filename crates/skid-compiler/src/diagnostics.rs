use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity { Info, Warning }

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<usize>,
    /// Commande DSL en cause (`let`, `endtry`…)
    pub command: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, msg: impl Into<String>) -> Self {
        Self { severity, message: msg.into(), file: None, line: None, command: None }
    }
    pub fn warning(msg: impl Into<String>) -> Self { Self::new(Severity::Warning, msg) }
    pub fn info(msg: impl Into<String>) -> Self { Self::new(Severity::Info, msg) }

    pub fn at_line(mut self, line: usize) -> Self {
        if line > 0 { self.line = Some(line); }
        self
    }
    pub fn for_command(mut self, name: impl Into<String>) -> Self { self.command = Some(name.into()); self }
    pub fn in_file(mut self, file: impl Into<String>) -> Self { self.file = Some(file.into()); self }

    /// Bloquant en mode strict ?
    pub fn is_blocking(&self) -> bool { self.severity >= Severity::Warning }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        })
    }
}

/// `fichier:ligne: severity [cmd]: message`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file { write!(f, "{file}:")?; }
        if let Some(line) = self.line { write!(f, "{line}:")?; }
        if self.file.is_some() || self.line.is_some() { f.write_str(" ")?; }
        write!(f, "{}", self.severity)?;
        if let Some(cmd) = &self.command { write!(f, " [{cmd}]")?; }
        write!(f, ": {}", self.message)
    }
}

/// Rend une liste de diagnostics, un par ligne.
pub fn render(diags: &[Diagnostic]) -> String {
    diags.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_location() {
        let d = Diagnostic::warning("argument manquant").at_line(4).for_command("let").in_file("a.skid");
        assert_eq!(d.to_string(), "a.skid:4: warning [let]: argument manquant");
    }

    #[test]
    fn display_without_location() {
        assert_eq!(Diagnostic::info("ok").to_string(), "info: ok");
    }

    #[test]
    fn line_zero_is_unknown() {
        assert_eq!(Diagnostic::warning("x").at_line(0).line, None);
    }

    #[test]
    fn blocking_threshold() {
        assert!(!Diagnostic::info("x").is_blocking());
        assert!(Diagnostic::warning("x").is_blocking());
    }
}
