/*
    This module is for storing and manipulating context-free grammars
*/

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use itertools::Itertools;

// The base unit in a grammar rule. The tag is authoritative: whether a name
// denotes a terminal is decided by the grammar's symbol sets, never by how
// the name is spelled.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(name) => write!(f, "'{}'", name),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

// The symbols in a single alternative; an empty alternative is epsilon
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule. A set: duplicate alternatives are
// meaningless, and iteration order is deterministic for rendering.
pub type Rewrite = BTreeSet<Alternative>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub nonterminals: BTreeSet<String>,
    pub terminals: BTreeSet<String>,
    pub start_symbol: String,
    pub rules: BTreeMap<String, Rewrite>,
}

impl Grammar {
    pub fn new(start_symbol: &str) -> Grammar {
        Grammar {
            nonterminals: BTreeSet::from([start_symbol.to_string()]),
            terminals: BTreeSet::new(),
            start_symbol: start_symbol.to_string(),
            rules: BTreeMap::new(),
        }
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterminals.contains(name)
    }

    pub fn add_rule(&mut self, lhs: &str, alternative: Alternative) {
        self.rules
            .entry(lhs.to_string())
            .or_default()
            .insert(alternative);
    }

    // The alternatives of a nonterminal; empty for one without rules
    pub fn alternatives(&self, name: &str) -> impl Iterator<Item = &Alternative> + '_ {
        self.rules.get(name).into_iter().flatten()
    }

    // Allocates a nonterminal name that collides with nothing currently
    // declared, registers it, and returns it. Tries the stem itself first,
    // then stem_1, stem_2, ... Both symbol sets are checked so a fresh
    // nonterminal can never shadow a terminal.
    pub fn fresh_nonterminal(&mut self, stem: &str) -> String {
        let mut name = stem.to_string();
        let mut suffix = 0u32;
        while self.nonterminals.contains(&name) || self.terminals.contains(&name) {
            suffix += 1;
            name = format!("{}_{}", stem, suffix);
        }
        self.nonterminals.insert(name.clone());
        name
    }
}

fn render_alternative(alternative: &Alternative) -> String {
    if alternative.is_empty() {
        "&".to_string()
    } else {
        alternative.iter().map(Symbol::to_string).join(" ")
    }
}

// Snapshot rendering: the start line, then one line per nonterminal with at
// least one alternative, in lexicographic order
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Start: {}", self.start_symbol)?;
        for (lhs, rewrite) in &self.rules {
            if rewrite.is_empty() {
                continue;
            }
            writeln!(f, "{} -> {}", lhs, rewrite.iter().map(render_alternative).join(" | "))?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn symbol_kind_is_the_tag_not_the_spelling() {
        let mut grammar = Grammar::new("s");
        grammar.terminals.insert("Loop".to_string());

        // a lower-case nonterminal and a capitalized terminal are both fine
        assert!(grammar.is_nonterminal("s"));
        assert!(grammar.is_terminal("Loop"));
        assert!(!grammar.is_terminal("s"));
        assert_ne!(s_terminal("x"), s_nonterminal("x"));
    }

    #[test]
    fn fresh_nonterminal_avoids_collisions() {
        let mut grammar = Grammar::new("S");
        grammar.nonterminals.insert("T".to_string());
        grammar.terminals.insert("T_1".to_string());

        assert_eq!(grammar.fresh_nonterminal("S0"), "S0");
        // "T" is a declared variable and "T_1" a declared terminal
        assert_eq!(grammar.fresh_nonterminal("T"), "T_2");
        // allocations register themselves
        assert_eq!(grammar.fresh_nonterminal("S0"), "S0_1");
        assert!(grammar.is_nonterminal("S0"));
        assert!(grammar.is_nonterminal("S0_1"));
        assert!(grammar.is_nonterminal("T_2"));
    }

    #[test]
    fn fresh_names_stay_unique_over_many_allocations() {
        let mut grammar = Grammar::new("S");
        let mut seen = BTreeSet::new();
        for _ in 0..50 {
            assert!(seen.insert(grammar.fresh_nonterminal("N")));
        }
    }

    #[test]
    fn add_rule_deduplicates() {
        let mut grammar = Grammar::new("S");
        grammar.terminals.insert("a".to_string());
        grammar.add_rule("S", vec![s_terminal("a")]);
        grammar.add_rule("S", vec![s_terminal("a")]);
        assert_eq!(grammar.rules["S"].len(), 1);
    }

    #[test]
    fn render_sorted_with_quoted_terminals_and_epsilon() {
        let mut grammar = Grammar::new("S");
        grammar.nonterminals.insert("A".to_string());
        grammar.terminals.extend(["a".to_string(), "b".to_string()]);
        grammar.add_rule("S", vec![s_terminal("a"), s_nonterminal("A")]);
        grammar.add_rule("S", vec![]);
        grammar.add_rule("A", vec![s_terminal("b")]);

        let rendered = grammar.to_string();
        assert_eq!(rendered, "Start: S\nA -> 'b'\nS -> & | 'a' A\n");
    }
}
