/*
    Useless-symbol removal: every surviving nonterminal both generates a
    terminal string and is reachable from the start symbol
*/

use std::collections::BTreeSet;

use crate::grammar::{Grammar, Symbol};
use super::sets::{generating_set, reachable_set};

pub struct UselessReport {
    pub generating: BTreeSet<String>,
    pub reachable: BTreeSet<String>,
}

pub fn remove_useless(grammar: &mut Grammar) -> UselessReport {
    let start = grammar.start_symbol.clone();

    // first prune everything that cannot ground in a terminal string; the
    // start symbol stays declared even when the language is empty
    let generating = generating_set(grammar);
    grammar.nonterminals.retain(|name| *name == start || generating.contains(name));
    grammar.rules.retain(|lhs, _| generating.contains(lhs));
    for rewrite in grammar.rules.values_mut() {
        rewrite.retain(|alternative| {
            alternative.iter().all(|symbol| match symbol {
                Symbol::Terminal(_) => true,
                Symbol::Nonterminal(name) => generating.contains(name),
            })
        });
    }

    // reachability runs over the pruned rules, so a path through a deleted
    // symbol cannot revive anything
    let reachable = reachable_set(grammar);
    grammar.nonterminals.retain(|name| reachable.contains(name));
    grammar.rules.retain(|lhs, _| reachable.contains(lhs));

    UselessReport { generating, reachable }
}
