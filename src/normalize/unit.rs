/*
    Unit-production elimination: no alternative is a lone nonterminal
    afterwards
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::grammar::Grammar;
use super::sets::{unit_closure, unit_target};

pub fn remove_units(grammar: &mut Grammar) {
    // closures are computed against the pre-pass rules, then the rules are
    // rebuilt from scratch so no partially rewritten state is ever read
    let closures: BTreeMap<String, BTreeSet<String>> = grammar
        .nonterminals
        .iter()
        .map(|name| (name.clone(), unit_closure(grammar, name)))
        .collect();

    let old_rules = std::mem::take(&mut grammar.rules);
    for (lhs, closure) in &closures {
        for member in closure {
            let Some(rewrite) = old_rules.get(member) else {
                continue;
            };
            for alternative in rewrite {
                if unit_target(alternative).is_none() {
                    grammar.add_rule(lhs, alternative.clone());
                }
            }
        }
    }
}
