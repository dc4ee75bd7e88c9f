//! rules.rs — Une fonction par commande : `(args, état) → lignes émises`.
//!
//! Une règle qui refuse sa ligne renvoie `Err(Skip)` sans rien émettre ;
//! le générateur transforme le `Skip` en diagnostic.

use std::fmt;

use super::state::{BlockKind, GenState};
use crate::diagnostics::Diagnostic;
use crate::token::is_type_keyword;

/// Raison pour laquelle une ligne n’a rien produit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    TooFewArgs { need: usize, got: usize },
    Arity(&'static str),
    /// `let x int` / `const x int` : type sans valeur.
    MissingValue,
    /// `func (r T)` : récepteur sans nom de fonction.
    MissingName,
    NoOpenStruct,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::TooFewArgs { need, got } => write!(f, "{need} argument(s) minimum, {got} fourni(s)"),
            Skip::Arity(form) => write!(f, "forme attendue : {form}"),
            Skip::MissingValue => f.write_str("type donné sans valeur"),
            Skip::MissingName => f.write_str("récepteur sans nom de fonction"),
            Skip::NoOpenStruct => f.write_str("aucun `struct` ouvert"),
        }
    }
}

pub type Outcome = Result<(), Skip>;

const RECOVER_VAR: &str = "recovered";

/* ───────────────────────── Sorties ───────────────────────── */

pub(crate) fn print(args: &[String], st: &mut GenState) -> Outcome {
    st.emit_main(format!("\tfmt.Println({})", args.join(" ")));
    Ok(())
}

pub(crate) fn printf(args: &[String], st: &mut GenState) -> Outcome {
    let (format, values) = args.split_first().ok_or(Skip::TooFewArgs { need: 1, got: 0 })?;
    if values.is_empty() {
        st.emit_main(format!("\tfmt.Printf({format})"));
    } else {
        st.emit_main(format!("\tfmt.Printf({format}, {})", values.join(", ")));
    }
    Ok(())
}

pub(crate) fn input(args: &[String], st: &mut GenState) -> Outcome {
    match args {
        [name, ty] if is_type_keyword(ty) => {
            st.emit_main(format!("\tvar {name} {ty}"));
            st.emit_main(format!("\tfmt.Scan(&{name})"));
        }
        [name] => st.emit_main(format!("\tfmt.Scan(&{name})")),
        _ => return Err(Skip::Arity("`input nom` ou `input nom type`")),
    }
    Ok(())
}

/* ───────────────────────── Variables ───────────────────────── */

/// `nom [type] valeur…` → (nom, type éventuel, valeur).
fn binding(args: &[String]) -> Result<(&str, Option<&str>, String), Skip> {
    let name = args[0].as_str();
    if is_type_keyword(&args[1]) {
        if args.len() < 3 {
            return Err(Skip::MissingValue);
        }
        Ok((name, Some(args[1].as_str()), args[2..].join(" ")))
    } else {
        Ok((name, None, args[1..].join(" ")))
    }
}

pub(crate) fn let_(args: &[String], st: &mut GenState) -> Outcome {
    match binding(args)? {
        (name, Some(ty), value) => st.emit_main(format!("\tvar {name} {ty} = {value}")),
        (name, None, value) => st.emit_main(format!("\t{name} := {value}")),
    }
    Ok(())
}

pub(crate) fn const_(args: &[String], st: &mut GenState) -> Outcome {
    match binding(args)? {
        (name, Some(ty), value) => st.emit_top(format!("const {name} {ty} = {value}")),
        (name, None, value) => st.emit_top(format!("const {name} = {value}")),
    }
    Ok(())
}

pub(crate) fn set(args: &[String], st: &mut GenState) -> Outcome {
    st.emit_main(format!("\t{} = {}", args[0], args[1..].join(" ")));
    Ok(())
}

pub(crate) fn inc(args: &[String], st: &mut GenState) -> Outcome {
    step(args, st, "++")
}

pub(crate) fn dec(args: &[String], st: &mut GenState) -> Outcome {
    step(args, st, "--")
}

fn step(args: &[String], st: &mut GenState, op: &str) -> Outcome {
    match args {
        [name] => {
            st.emit_main(format!("\t{name}{op}"));
            Ok(())
        }
        _ => Err(Skip::Arity("exactement 1 argument")),
    }
}

/* ───────────────────────── Contrôle ───────────────────────── */

pub(crate) fn if_(args: &[String], st: &mut GenState) -> Outcome {
    st.open(BlockKind::If);
    st.emit_main(format!("\tif {} {{", args.join(" ")));
    Ok(())
}

pub(crate) fn else_(_args: &[String], st: &mut GenState) -> Outcome {
    st.expect_inside(&[BlockKind::If]);
    st.emit_main("\t} else {");
    Ok(())
}

pub(crate) fn end(_args: &[String], st: &mut GenState) -> Outcome {
    st.close(&[BlockKind::If, BlockKind::While, BlockKind::For]);
    st.emit_main("\t}");
    Ok(())
}

pub(crate) fn while_(args: &[String], st: &mut GenState) -> Outcome {
    st.open(BlockKind::While);
    st.emit_main(format!("\tfor {} {{", args.join(" ")));
    Ok(())
}

pub(crate) fn for_(args: &[String], st: &mut GenState) -> Outcome {
    st.open(BlockKind::For);
    st.emit_main(format!("\tfor {} {{", args.join(" ")));
    Ok(())
}

pub(crate) fn switch(args: &[String], st: &mut GenState) -> Outcome {
    st.open(BlockKind::Switch);
    st.emit_main(format!("\tswitch {} {{", args.join(" ")));
    Ok(())
}

pub(crate) fn case(args: &[String], st: &mut GenState) -> Outcome {
    st.expect_inside(&[BlockKind::Switch]);
    st.emit_main(format!("\tcase {}:", args.join(" ")));
    Ok(())
}

pub(crate) fn default(_args: &[String], st: &mut GenState) -> Outcome {
    st.expect_inside(&[BlockKind::Switch]);
    st.emit_main("\tdefault:");
    Ok(())
}

pub(crate) fn end_switch(_args: &[String], st: &mut GenState) -> Outcome {
    st.close(&[BlockKind::Switch]);
    st.emit_main("\t}");
    Ok(())
}

/* ───────────────────────── try / catch ───────────────────────── */
//
// if recovered := func() (caught any) {
//     defer func() { caught = recover() }()
//     <corps>
//     return
// }(); recovered != nil {
//     <catch>
// }

pub(crate) fn try_(_args: &[String], st: &mut GenState) -> Outcome {
    st.open(BlockKind::Try);
    st.emit_main(format!("\tif {RECOVER_VAR} := func() (caught any) {{"));
    st.emit_main("\t\tdefer func() { caught = recover() }()");
    Ok(())
}

fn open_handler(st: &mut GenState) {
    st.emit_main("\t\treturn");
    st.emit_main(format!("\t}}(); {RECOVER_VAR} != nil {{"));
}

pub(crate) fn catch(args: &[String], st: &mut GenState) -> Outcome {
    st.expect_inside(&[BlockKind::Try]);
    match st.nearest_try_caught() {
        Some(true) => st.report(Diagnostic::warning("second `catch` pour le même `try`")),
        Some(false) => {
            st.mark_caught();
            open_handler(st);
        }
        None => open_handler(st),
    }
    if let Some(name) = args.first() {
        st.emit_main(format!("\t\t{name} := {RECOVER_VAR}"));
        st.emit_main(format!("\t\t_ = {name}"));
    }
    st.emit_main("\t\t// Handle error");
    Ok(())
}

/// Sans `try` ouvert, seule l’accolade fermante est émise.
pub(crate) fn end_try(_args: &[String], st: &mut GenState) -> Outcome {
    if st.close(&[BlockKind::Try]).is_some_and(|b| !b.caught) {
        open_handler(st);
    }
    st.emit_main("\t}");
    Ok(())
}

/* ───────────────────────── Fonctions ───────────────────────── */

pub(crate) fn func(args: &[String], st: &mut GenState) -> Outcome {
    let header = function_header(args, st)?;
    st.open(BlockKind::Func);
    st.emit_top(format!("{header} {{"));
    Ok(())
}

/// `[(recv)] nom [p T]… [-> ret…]` → `func [(recv) ]nom(p T, …)[ ret]`
fn function_header(args: &[String], st: &mut GenState) -> Result<String, Skip> {
    let (receiver, name, rest) = match args {
        [recv, name, rest @ ..] if recv.starts_with('(') => (Some(recv), name, rest),
        [recv] if recv.starts_with('(') => return Err(Skip::MissingName),
        [name, rest @ ..] => (None, name, rest),
        [] => return Err(Skip::TooFewArgs { need: 1, got: 0 }),
    };

    let (params, ret) = match rest.iter().position(|a| a == "->") {
        Some(i) => {
            let after = &rest[i + 1..];
            let end = after.iter().position(|a| a == "->").unwrap_or(after.len());
            (&rest[..i], after[..end].join(" "))
        }
        None => (rest, String::new()),
    };

    let pairs = params.chunks_exact(2);
    if let [dangling] = pairs.remainder() {
        st.report(Diagnostic::info(format!("paramètre `{dangling}` sans type ignoré")));
    }
    let params = pairs.map(|p| format!("{} {}", p[0], p[1])).collect::<Vec<_>>().join(", ");

    let mut header = match receiver {
        Some(recv) => format!("func {recv} {name}({params})"),
        None => format!("func {name}({params})"),
    };
    if !ret.is_empty() {
        header.push(' ');
        header.push_str(&ret);
    }
    Ok(header)
}

pub(crate) fn end_func(_args: &[String], st: &mut GenState) -> Outcome {
    st.close(&[BlockKind::Func]);
    st.emit_top("}");
    Ok(())
}

pub(crate) fn call(args: &[String], st: &mut GenState) -> Outcome {
    st.emit_main(format!("\t{}({})", args[0], args[1..].join(", ")));
    Ok(())
}

pub(crate) fn return_(args: &[String], st: &mut GenState) -> Outcome {
    if args.is_empty() {
        st.emit_top("\treturn");
    } else {
        st.emit_top(format!("\treturn {}", args.join(" ")));
    }
    Ok(())
}

/* ───────────────────────── Structs ───────────────────────── */

pub(crate) fn struct_(args: &[String], st: &mut GenState) -> Outcome {
    if let Some(open) = st.current_struct.clone() {
        let msg = format!("`struct` ouvert alors que `{open}` n’est pas fermé");
        st.report(Diagnostic::warning(msg));
    }
    let name = args[0].clone();
    st.open(BlockKind::Struct);
    st.emit_top(format!("type {name} struct {{"));
    st.current_struct = Some(name);
    Ok(())
}

pub(crate) fn field(args: &[String], st: &mut GenState) -> Outcome {
    if st.current_struct.is_none() {
        return Err(Skip::NoOpenStruct);
    }
    st.emit_top(format!("\t{} {}", args[0], args[1..].join(" ")));
    Ok(())
}

pub(crate) fn end_struct(_args: &[String], st: &mut GenState) -> Outcome {
    if st.current_struct.take().is_none() {
        return Err(Skip::NoOpenStruct);
    }
    st.close(&[BlockKind::Struct]);
    st.emit_top("}");
    Ok(())
}

/* ───────────────────────── Imports ───────────────────────── */

pub(crate) fn import(args: &[String], st: &mut GenState) -> Outcome {
    let pkg = args.join(" ");
    log::trace!("import `{pkg}`");
    st.imports.insert(pkg);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| (*s).to_string()).collect()
    }

    fn header(xs: &[&str]) -> Result<String, Skip> {
        let mut st = GenState::new();
        function_header(&a(xs), &mut st)
    }

    #[test]
    fn header_plain() {
        assert_eq!(header(&["main"]).unwrap(), "func main()");
    }

    #[test]
    fn header_params_and_return() {
        assert_eq!(header(&["add", "a", "int", "b", "int", "->", "int"]).unwrap(), "func add(a int, b int) int");
    }

    #[test]
    fn header_multi_word_return_stops_at_next_arrow() {
        assert_eq!(
            header(&["f", "->", "(int,", "error)", "->", "junk"]).unwrap(),
            "func f() (int, error)"
        );
    }

    #[test]
    fn header_receiver() {
        assert_eq!(
            header(&["(p*Point)", "Move", "dx", "int"]).unwrap(),
            "func (p*Point) Move(dx int)"
        );
    }

    #[test]
    fn header_receiver_without_name() {
        assert_eq!(header(&["(p*Point)"]), Err(Skip::MissingName));
    }

    #[test]
    fn header_drops_dangling_param() {
        let mut st = GenState::new();
        let h = function_header(&a(&["f", "a", "int", "b"]), &mut st).unwrap();
        assert_eq!(h, "func f(a int)");
        assert_eq!(st.diagnostics.len(), 1);
    }

    #[test]
    fn trailing_arrow_means_no_return_type() {
        assert_eq!(header(&["f", "a", "int", "->"]).unwrap(), "func f(a int)");
    }

    #[test]
    fn let_typed_without_value_is_skipped() {
        let mut st = GenState::new();
        assert_eq!(let_(&a(&["x", "int"]), &mut st), Err(Skip::MissingValue));
        assert!(st.main_body.is_empty());
    }

    #[test]
    fn printf_without_values() {
        let mut st = GenState::new();
        printf(&a(&["\"hi\\n\""]), &mut st).unwrap();
        assert_eq!(st.main_body, ["\tfmt.Printf(\"hi\\n\")"]);
    }

    #[test]
    fn input_forms() {
        let mut st = GenState::new();
        input(&a(&["n", "int"]), &mut st).unwrap();
        input(&a(&["n"]), &mut st).unwrap();
        assert_eq!(input(&a(&["n", "Foo"]), &mut st), Err(Skip::Arity("`input nom` ou `input nom type`")));
        assert_eq!(st.main_body, ["\tvar n int", "\tfmt.Scan(&n)", "\tfmt.Scan(&n)"]);
    }

    #[test]
    fn inc_requires_exactly_one() {
        let mut st = GenState::new();
        assert!(inc(&a(&["i", "j"]), &mut st).is_err());
        dec(&a(&["i"]), &mut st).unwrap();
        assert_eq!(st.main_body, ["\ti--"]);
    }

    #[test]
    fn stray_endtry_emits_only_the_closing_brace() {
        let mut st = GenState::new();
        end_try(&[], &mut st).unwrap();
        assert_eq!(st.main_body, ["\t}"]);
        assert_eq!(st.diagnostics.len(), 1);
    }

    #[test]
    fn catch_without_try_still_emits_handler() {
        let mut st = GenState::new();
        catch(&a(&["e"]), &mut st).unwrap();
        assert_eq!(st.main_body[1], "\t}(); recovered != nil {");
        assert_eq!(st.diagnostics.len(), 1);
    }
}
