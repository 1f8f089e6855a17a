//! # Scanner Module
//!
//! Lexical type-name extraction from controller source files.
//!
//! Discovery never parses source files. It only needs the fully-qualified
//! name of the first named type a file declares, so it can ask the
//! [`TypeCatalog`](crate::catalog::TypeCatalog) to load it. The scan:
//!
//! - tracks the most recent `namespace` declaration (`namespace App\Http;`
//!   or bracketed `namespace App\Http { ... }`);
//! - stops at the first `class` or `interface` declaration whose keyword is
//!   not part of an anonymous type (`new class (...)`, also with modifiers
//!   or attributes between `new` and `class`) or a class-constant fetch
//!   (`Foo::class`, `$obj->class`);
//! - ignores whitespace, comments, strings and heredocs between tokens.
//!
//! ```rust
//! use attroute::scanner::extract_type_name;
//!
//! let src = r#"<?php
//! namespace App\Http\Controllers;
//!
//! $factory = new class { };
//!
//! final class UserController extends BaseController { }
//! "#;
//! assert_eq!(
//!     extract_type_name(src).as_deref(),
//!     Some("App\\Http\\Controllers\\UserController"),
//! );
//! ```

mod lexer;
#[cfg(test)]
mod tests;

pub use lexer::{Lexer, Token};

use std::path::Path;
use tracing::warn;

/// Return the fully-qualified name of the first named type declared in `source`.
#[must_use]
pub fn extract_type_name(source: &str) -> Option<String> {
    let tokens: Vec<Token<'_>> = Lexer::new(source).collect();
    let mut namespace = "";

    for (i, token) in tokens.iter().enumerate() {
        if token.is_keyword("namespace") {
            // `namespace;`/`namespace {` re-enters the global namespace.
            namespace = match tokens.get(i + 1) {
                Some(Token::Name(name)) => name.trim_start_matches('\\'),
                _ => "",
            };
            continue;
        }

        if !(token.is_keyword("class") || token.is_keyword("interface")) {
            continue;
        }

        let anonymous_or_fetch = preceding_context(&tokens, i).is_some_and(|prev| {
            prev.is_keyword("new") || matches!(prev, Token::Punct("::" | "->" | "?->"))
        });
        if anonymous_or_fetch {
            continue;
        }

        match tokens.get(i + 1) {
            Some(Token::Name(name)) if !is_clause_keyword(name) => {
                let name = name.trim_start_matches('\\');
                return Some(if namespace.is_empty() {
                    name.to_string()
                } else {
                    format!("{namespace}\\{name}")
                });
            }
            _ => continue,
        }
    }

    None
}

/// The token that decides what a `class` keyword at `i` belongs to.
///
/// Skips class modifiers and whole `#[...]` attribute groups, so
/// `new readonly class` and `new #[Attr] class` both resolve to `new`.
fn preceding_context<'t, 'a>(tokens: &'t [Token<'a>], i: usize) -> Option<&'t Token<'a>> {
    let mut j = i;
    while j > 0 {
        j -= 1;
        let token = &tokens[j];
        if ["readonly", "final", "abstract"].iter().any(|m| token.is_keyword(m)) {
            continue;
        }
        if *token != Token::Punct("]") {
            return Some(token);
        }

        let close = j;
        let mut depth = 0usize;
        loop {
            match tokens[j] {
                Token::Punct("]") => depth += 1,
                Token::Punct("[" | "#[") => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                break;
            }
            if j == 0 {
                return None;
            }
            j -= 1;
        }
        if tokens[j] != Token::Punct("#[") {
            return Some(&tokens[close]);
        }
    }
    None
}

/// Words that follow `class` in an anonymous declaration and never name a type.
fn is_clause_keyword(name: &str) -> bool {
    ["extends", "implements"]
        .iter()
        .any(|k| name.eq_ignore_ascii_case(k))
}

/// Read `path` and extract its type name.
///
/// Unreadable files (permissions, invalid UTF-8) yield `None` with a warning,
/// the same as files that declare no type.
#[must_use]
pub fn extract_type_name_from_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => extract_type_name(&source),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Skipping unreadable source file");
            None
        }
    }
}
