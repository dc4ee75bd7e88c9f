//! tokenizer.rs — Découpage ligne à ligne du DSL `.skid`.
//!
//! Règles :
//! - une commande par ligne ; lignes vides et lignes `#…` ignorées ;
//! - séparateurs : espace et tabulation, **hors** quotes et crochets ;
//! - `'…'` / `"…"` : la quote ouvrante/fermante est conservée dans le token ;
//!   une quote de l’autre type à l’intérieur est littérale ;
//! - `[…]` : profondeur comptée hors quotes, crochets conservés ;
//! - `\x` : `x` est ajouté tel quel (même dans une quote), le `\` disparaît.
//!
//! Aucun état ne traverse les lignes : une quote ou un crochet non fermé en fin
//! de ligne n’est pas une erreur, le buffer est simplement vidé.

use crate::token::Token;

/* ───────────────────────── API ───────────────────────── */

/// Tokenise tout le texte source : un `Token` par ligne non vide.
pub fn lex(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    for (idx, raw) in input.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = split_line(line).into_iter();
        let Some(command) = parts.next() else { continue };
        out.push(Token::new(command, parts.collect()).at_line(idx + 1));
    }
    log::trace!("lex: {} token(s)", out.len());
    out
}

/// Découpe une ligne (déjà trimée ou non) en mots.
pub fn split_line(line: &str) -> Vec<String> {
    let mut sc = LineScanner::default();
    for ch in line.chars() {
        sc.feed(ch);
    }
    sc.finish()
}

/* ───────────────────────── Automate ───────────────────────── */

#[derive(Default)]
struct LineScanner {
    buf: String,
    quote: Option<char>,
    depth: usize,
    escape: bool,
    words: Vec<String>,
}

impl LineScanner {
    fn feed(&mut self, ch: char) {
        if self.escape {
            self.buf.push(ch);
            self.escape = false;
            return;
        }
        match ch {
            '\\' => self.escape = true,
            '\'' | '"' => {
                match self.quote {
                    None => self.quote = Some(ch),
                    Some(q) if q == ch => self.quote = None,
                    Some(_) => {}
                }
                self.buf.push(ch);
            }
            '[' => {
                if self.quote.is_none() {
                    self.depth += 1;
                }
                self.buf.push(ch);
            }
            ']' => {
                if self.quote.is_none() && self.depth > 0 {
                    self.depth -= 1;
                }
                self.buf.push(ch);
            }
            ' ' | '\t' if self.quote.is_none() && self.depth == 0 => self.flush(),
            _ => self.buf.push(ch),
        }
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.words.push(std::mem::take(&mut self.buf));
        }
    }

    fn finish(mut self) -> Vec<String> {
        // un `\` final reste non consommé : rien à faire
        self.flush();
        self.words
    }
}

/* ───────────────────────── Tests ───────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        split_line(s)
    }

    #[test]
    fn brackets_keep_spaces() {
        assert_eq!(words("let x int [1 2 3]"), ["let", "x", "int", "[1 2 3]"]);
    }

    #[test]
    fn nested_brackets() {
        assert_eq!(words("let m [[1 2] [3]] end"), ["let", "m", "[[1 2] [3]]", "end"]);
    }

    #[test]
    fn quotes_keep_spaces_and_delimiters() {
        assert_eq!(words(r#"print "hello world" 'a b'"#), ["print", "\"hello world\"", "'a b'"]);
    }

    #[test]
    fn other_quote_is_literal_inside_quote() {
        assert_eq!(words(r#"print "it's fine" x"#), ["print", "\"it's fine\"", "x"]);
    }

    #[test]
    fn bracket_inside_quote_does_not_count() {
        assert_eq!(words(r#"print "[" x"#), ["print", "\"[\"", "x"]);
    }

    #[test]
    fn escaped_space_joins_words() {
        assert_eq!(words(r"print a\ b"), ["print", "a b"]);
    }

    #[test]
    fn escaped_quote_does_not_open() {
        assert_eq!(words(r#"print \"a b"#), ["print", "\"a", "b"]);
    }

    #[test]
    fn tabs_separate() {
        assert_eq!(words("set\tx\t\t1"), ["set", "x", "1"]);
    }

    #[test]
    fn unterminated_quote_is_flushed() {
        assert_eq!(words(r#"print "abc def"#), ["print", "\"abc def"]);
    }

    #[test]
    fn trailing_escape_is_dropped() {
        assert_eq!(words(r"print x\"), ["print", "x"]);
    }

    #[test]
    fn unmatched_close_bracket_is_plain() {
        assert_eq!(words("print ] x"), ["print", "]", "x"]);
    }

    #[test]
    fn lex_skips_comments_and_blanks() {
        let toks = lex("# hello\n\n   \n  # indented\nprint 1\n");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].command, "print");
        assert_eq!(toks[0].args, ["1"]);
        assert_eq!(toks[0].line, 5);
    }

    #[test]
    fn state_does_not_cross_lines() {
        let toks = lex("print \"open\nprint closed");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].args, ["\"open"]);
        assert_eq!(toks[1].args, ["closed"]);
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let toks = lex("inc x\r\ndec y\r\n");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].args, ["x"]);
        assert_eq!(toks[1].command, "dec");
    }
}
