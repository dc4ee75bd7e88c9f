//! command.rs — Table fermée des commandes du DSL.
//!
//! Chaque nom de commande reconnu correspond à exactement une variante ;
//! ajouter ou retirer une commande casse le `match` du codegen à la compilation.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Print,
    Printf,
    Let,
    Set,
    If,
    Else,
    End,
    While,
    For,
    Func,
    EndFunc,
    Call,
    Return,
    Input,
    Switch,
    Case,
    Default,
    EndSwitch,
    Try,
    Catch,
    EndTry,
    Struct,
    Field,
    EndStruct,
    Inc,
    Dec,
    Const,
    Import,
}

impl Command {
    pub const ALL: [Command; 28] = [
        Command::Print,
        Command::Printf,
        Command::Let,
        Command::Set,
        Command::If,
        Command::Else,
        Command::End,
        Command::While,
        Command::For,
        Command::Func,
        Command::EndFunc,
        Command::Call,
        Command::Return,
        Command::Input,
        Command::Switch,
        Command::Case,
        Command::Default,
        Command::EndSwitch,
        Command::Try,
        Command::Catch,
        Command::EndTry,
        Command::Struct,
        Command::Field,
        Command::EndStruct,
        Command::Inc,
        Command::Dec,
        Command::Const,
        Command::Import,
    ];

    /// Nom tel qu’écrit dans un fichier `.skid`.
    pub const fn name(self) -> &'static str {
        match self {
            Command::Print => "print",
            Command::Printf => "printf",
            Command::Let => "let",
            Command::Set => "set",
            Command::If => "if",
            Command::Else => "else",
            Command::End => "end",
            Command::While => "while",
            Command::For => "for",
            Command::Func => "func",
            Command::EndFunc => "endfunc",
            Command::Call => "call",
            Command::Return => "return",
            Command::Input => "input",
            Command::Switch => "switch",
            Command::Case => "case",
            Command::Default => "default",
            Command::EndSwitch => "endswitch",
            Command::Try => "try",
            Command::Catch => "catch",
            Command::EndTry => "endtry",
            Command::Struct => "struct",
            Command::Field => "field",
            Command::EndStruct => "endstruct",
            Command::Inc => "inc",
            Command::Dec => "dec",
            Command::Const => "const",
            Command::Import => "import",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Nombre minimal d’arguments ; en dessous, la ligne est ignorée.
    pub const fn min_args(self) -> usize {
        match self {
            Command::Printf
            | Command::Func
            | Command::Call
            | Command::Input
            | Command::Struct
            | Command::Inc
            | Command::Dec
            | Command::Import => 1,
            Command::Let | Command::Set | Command::Field | Command::Const => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for c in Command::ALL {
            assert_eq!(Command::from_name(c.name()), Some(c));
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(Command::from_name("Print"), None);
        assert_eq!(Command::from_name("endTry"), None);
    }

    #[test]
    fn arity_table() {
        assert_eq!(Command::Print.min_args(), 0);
        assert_eq!(Command::Printf.min_args(), 1);
        assert_eq!(Command::Let.min_args(), 2);
        assert_eq!(Command::Field.min_args(), 2);
        assert_eq!(Command::EndStruct.min_args(), 0);
    }
}
