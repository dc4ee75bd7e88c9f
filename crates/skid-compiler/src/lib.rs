//! skid-compiler — transpileur du DSL `.skid` vers Go.
//!
//! - [`tokenizer`] : une ligne → un [`Token`] (quotes, crochets, échappements)
//! - [`codegen`]   : une passe sur les tokens → fichier Go complet
//! - [`pipeline`]  : orchestration (config, diagnostics, mode strict)
//! - [`backends`]  : toolchain externe (`go build`)
//!
//! ```
//! let go = skid_compiler::transpile("let x int 5\nprint x");
//! assert!(go.contains("var x int = 5"));
//! assert!(go.contains("fmt.Println(x)"));
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

pub mod backends;
pub mod codegen;
pub mod command;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod token;
pub mod tokenizer;
mod util;

pub use codegen::{generate, Generated, Generator};
pub use command::Command;
pub use config::{CliOverrides, Config};
pub use diagnostics::{Diagnostic, Severity};
pub use error::{Error, Result};
pub use pipeline::{BuildProduct, CompileProduct, Compiler};
pub use token::Token;
pub use tokenizer::lex;

/// Source DSL → Go, en mode tolérant (diagnostics ignorés).
pub fn transpile(source: &str) -> String {
    generate(&lex(source)).source
}
