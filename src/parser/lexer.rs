use std::collections::BTreeSet;

use log::warn;

use crate::grammar::{Alternative, Symbol};

// Greedy tokenization of one rule alternative: at each position prefer the
// longest declared nonterminal, then the longest declared terminal, then
// fall back to a single character, implicitly declaring it as a terminal.
// Whitespace between tokens is not significant.
pub fn lex_alternative(
    text: &str,
    nonterminals: &BTreeSet<String>,
    terminals: &mut BTreeSet<String>,
) -> Alternative {
    let mut symbols = Alternative::new();
    let mut rest = text.trim_start();

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = rest.trim_start();
        } else if let Some(name) = longest_prefix(rest, nonterminals) {
            rest = &rest[name.len()..];
            symbols.push(Symbol::Nonterminal(name));
        } else if let Some(name) = longest_prefix(rest, terminals) {
            rest = &rest[name.len()..];
            symbols.push(Symbol::Terminal(name));
        } else {
            let fallback = c.to_string();
            if terminals.insert(fallback.clone()) {
                warn!("symbol '{}' was not declared in Alfabeto, adding it", fallback);
            }
            rest = &rest[c.len_utf8()..];
            symbols.push(Symbol::Terminal(fallback));
        }
    }

    symbols
}

// The longest declared name the text starts with, if any
fn longest_prefix(text: &str, names: &BTreeSet<String>) -> Option<String> {
    names
        .iter()
        .filter(|name| text.starts_with(name.as_str()))
        .max_by_key(|name| name.len())
        .cloned()
}
