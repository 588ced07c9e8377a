/*
    The two passes that finish Chomsky Normal Form: terminal isolation and
    binarization. Both assume ε-, unit- and useless-elimination already ran.
*/

use std::collections::BTreeMap;

use crate::grammar::{Grammar, Symbol};

// In alternatives of two or more symbols, every terminal is replaced by a
// proxy nonterminal deriving exactly that terminal. One proxy per distinct
// terminal, reused across all occurrences.
pub fn isolate_terminals(grammar: &mut Grammar) {
    let old_rules = std::mem::take(&mut grammar.rules);
    let mut proxies: BTreeMap<String, String> = BTreeMap::new();
    let mut allocated = 0u32;

    for (lhs, rewrite) in &old_rules {
        for alternative in rewrite {
            if alternative.len() < 2 {
                grammar.add_rule(lhs, alternative.clone());
                continue;
            }
            let isolated = alternative
                .iter()
                .map(|symbol| match symbol {
                    Symbol::Nonterminal(_) => symbol.clone(),
                    Symbol::Terminal(terminal) => {
                        let proxy = proxies.entry(terminal.clone()).or_insert_with(|| {
                            allocated += 1;
                            grammar.fresh_nonterminal(&format!("T_{}", allocated))
                        });
                        Symbol::Nonterminal(proxy.clone())
                    }
                })
                .collect();
            grammar.add_rule(lhs, isolated);
        }
    }

    for (terminal, proxy) in &proxies {
        grammar.add_rule(proxy, vec![Symbol::Terminal(terminal.clone())]);
    }
}

// Alternatives longer than two symbols become right-branching chains of
// binary alternatives through fresh link nonterminals
pub fn binarize(grammar: &mut Grammar) {
    let old_rules = std::mem::take(&mut grammar.rules);
    let mut allocated = 0u32;

    for (lhs, rewrite) in &old_rules {
        for alternative in rewrite {
            if alternative.len() <= 2 {
                grammar.add_rule(lhs, alternative.clone());
                continue;
            }
            let mut current = lhs.clone();
            for symbol in &alternative[..alternative.len() - 2] {
                allocated += 1;
                let link = grammar.fresh_nonterminal(&format!("N_{}", allocated));
                grammar.add_rule(&current, vec![symbol.clone(), Symbol::Nonterminal(link.clone())]);
                current = link;
            }
            grammar.add_rule(&current, alternative[alternative.len() - 2..].to_vec());
        }
    }
}
