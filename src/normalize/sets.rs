/*
    Fixed-point set computations over a grammar

    Every solver here grows a subset of a finite universe monotonically,
    so each loop terminates.
*/

use std::collections::BTreeSet;

use crate::grammar::{Alternative, Grammar, Symbol};

// The nonterminals that can derive the empty string: those with an
// epsilon alternative, or an alternative made entirely of nullable
// nonterminals. Terminals are never nullable.
pub fn nullable_set(grammar: &Grammar) -> BTreeSet<String> {
    let mut nullable = BTreeSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for lhs in &grammar.nonterminals {
            if nullable.contains(lhs) {
                continue;
            }
            let derives_empty = grammar.alternatives(lhs).any(|alternative| {
                alternative.iter().all(|symbol| match symbol {
                    Symbol::Nonterminal(name) => nullable.contains(name),
                    Symbol::Terminal(_) => false,
                })
            });
            if derives_empty {
                nullable.insert(lhs.clone());
                changed = true;
            }
        }
    }
    nullable
}

// The single nonterminal of a unit alternative, if the alternative is one
pub fn unit_target(alternative: &Alternative) -> Option<&str> {
    match alternative.as_slice() {
        [Symbol::Nonterminal(name)] => Some(name),
        _ => None,
    }
}

// The smallest set containing `name` and closed under unit steps:
// B in the closure and B -> C a lone nonterminal puts C in the closure
pub fn unit_closure(grammar: &Grammar, name: &str) -> BTreeSet<String> {
    let mut closure = BTreeSet::from([name.to_string()]);
    let mut pending = vec![name.to_string()];
    while let Some(current) = pending.pop() {
        for alternative in grammar.alternatives(&current) {
            if let Some(target) = unit_target(alternative) {
                if closure.insert(target.to_string()) {
                    pending.push(target.to_string());
                }
            }
        }
    }
    closure
}

// The nonterminals that can derive some string of terminals
pub fn generating_set(grammar: &Grammar) -> BTreeSet<String> {
    let mut generating = BTreeSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for lhs in &grammar.nonterminals {
            if generating.contains(lhs) {
                continue;
            }
            let grounded = grammar.alternatives(lhs).any(|alternative| {
                alternative.iter().all(|symbol| match symbol {
                    Symbol::Terminal(_) => true,
                    Symbol::Nonterminal(name) => generating.contains(name),
                })
            });
            if grounded {
                generating.insert(lhs.clone());
                changed = true;
            }
        }
    }
    generating
}

// The nonterminals reachable from the start symbol through the rules
pub fn reachable_set(grammar: &Grammar) -> BTreeSet<String> {
    let mut reachable = BTreeSet::from([grammar.start_symbol.clone()]);
    let mut pending = vec![grammar.start_symbol.clone()];
    while let Some(current) = pending.pop() {
        for alternative in grammar.alternatives(&current) {
            for symbol in alternative {
                if let Symbol::Nonterminal(name) = symbol {
                    if reachable.insert(name.clone()) {
                        pending.push(name.clone());
                    }
                }
            }
        }
    }
    reachable
}
