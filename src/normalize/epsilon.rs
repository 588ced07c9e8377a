/*
    ε-elimination: afterwards only the (possibly fresh) start symbol may
    have an empty alternative
*/

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::grammar::{Alternative, Grammar, Symbol};
use super::sets::{nullable_set, unit_target};

pub struct EpsilonReport {
    pub nullable: BTreeSet<String>,
    // set when the start symbol was nullable and had to be replaced
    pub fresh_start: Option<String>,
}

pub fn remove_epsilon(grammar: &mut Grammar) -> EpsilonReport {
    let nullable = nullable_set(grammar);
    let old_rules = std::mem::take(&mut grammar.rules);

    // a nullable start keeps ε in the language through a fresh start
    // symbol; this is the only empty alternative the output retains
    let mut fresh_start = None;
    if nullable.contains(&grammar.start_symbol) {
        let old_start = grammar.start_symbol.clone();
        let new_start = grammar.fresh_nonterminal("S0");
        grammar.add_rule(&new_start, vec![Symbol::Nonterminal(old_start)]);
        grammar.add_rule(&new_start, Alternative::new());
        grammar.start_symbol = new_start.clone();
        fresh_start = Some(new_start);
    }

    for (lhs, rewrite) in &old_rules {
        for alternative in rewrite {
            if alternative.is_empty() {
                continue; // original ε-alternatives are dropped
            }
            let nullable_positions: Vec<usize> = alternative
                .iter()
                .enumerate()
                .filter(|(_, symbol)| {
                    matches!(symbol, Symbol::Nonterminal(name) if nullable.contains(name))
                })
                .map(|(position, _)| position)
                .collect();

            // one variant per subset of nullable positions, that subset
            // deleted from the alternative
            for subset in nullable_positions.iter().copied().powerset() {
                let deleted: BTreeSet<usize> = subset.into_iter().collect();
                let variant: Alternative = alternative
                    .iter()
                    .enumerate()
                    .filter(|(position, _)| !deleted.contains(position))
                    .map(|(_, symbol)| symbol.clone())
                    .collect();

                // deleting everything re-creates ε, and a variant of just
                // the left-hand side is a self-loop; neither is kept
                if variant.is_empty() || unit_target(&variant) == Some(lhs.as_str()) {
                    continue;
                }
                grammar.add_rule(lhs, variant);
            }
        }
    }

    EpsilonReport { nullable, fresh_start }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::testing::{alts, build};

    // no alternative may be empty, except at the designated start
    fn assert_no_epsilon_outside_start(grammar: &Grammar) {
        for (lhs, rewrite) in &grammar.rules {
            for alternative in rewrite {
                assert!(
                    !alternative.is_empty() || *lhs == grammar.start_symbol,
                    "{} still has an empty alternative",
                    lhs
                );
            }
        }
    }

    #[test]
    fn nullable_start_gets_a_fresh_start_symbol() {
        let mut grammar = build("S", &["a", "b"], &[("S", "a S A | &"), ("A", "b")]);
        let report = remove_epsilon(&mut grammar);

        assert_eq!(report.fresh_start, Some("S0".to_string()));
        assert_eq!(grammar.start_symbol, "S0");
        assert_eq!(grammar.rules["S0"], alts(&[], "S | &"));
        assert_eq!(grammar.rules["S"], alts(&["a", "b"], "a A | a S A"));
        assert_eq!(grammar.rules["A"], alts(&["a", "b"], "b"));
        assert_no_epsilon_outside_start(&grammar);
    }

    #[test]
    fn variants_cover_every_subset_of_nullable_positions() {
        let mut grammar = build("S", &["a", "b"], &[
            ("S", "A B"),
            ("A", "a | &"),
            ("B", "b | &"),
        ]);
        let report = remove_epsilon(&mut grammar);

        assert_eq!(report.fresh_start, Some("S0".to_string()));
        // deleting both positions would be ε, which is not re-emitted
        assert_eq!(grammar.rules["S"], alts(&["a", "b"], "A B | A | B"));
        assert_eq!(grammar.rules["A"], alts(&["a", "b"], "a"));
        assert_eq!(grammar.rules["B"], alts(&["a", "b"], "b"));
    }

    #[test]
    fn non_nullable_start_is_kept() {
        let mut grammar = build("S", &["a"], &[("S", "a A"), ("A", "a | &")]);
        let report = remove_epsilon(&mut grammar);

        assert_eq!(report.nullable, BTreeSet::from(["A".to_string()]));
        assert_eq!(report.fresh_start, None);
        assert_eq!(grammar.start_symbol, "S");
        assert_eq!(grammar.rules["S"], alts(&["a"], "a A | a"));
        assert_no_epsilon_outside_start(&grammar);
    }

    #[test]
    fn degenerate_self_loops_are_dropped() {
        let mut grammar = build("S", &["a"], &[("S", "S A | a"), ("A", "&")]);
        remove_epsilon(&mut grammar);

        // S A with A deleted would be the self-loop S -> S
        assert_eq!(grammar.rules["S"], alts(&["a"], "S A | a"));
        assert!(!grammar.rules.contains_key("A"));
    }

    #[test]
    fn fresh_start_name_never_collides() {
        let mut grammar = build("S0", &["a"], &[("S0", "a | &"), ("S0_1", "a")]);
        let report = remove_epsilon(&mut grammar);

        assert_eq!(report.fresh_start, Some("S0_2".to_string()));
        assert_eq!(grammar.start_symbol, "S0_2");
    }

    #[test]
    fn language_is_preserved() {
        let before = build("S", &["a", "b"], &[("S", "a S b | &")]);
        let mut after = before.clone();
        remove_epsilon(&mut after);

        let reference = crate::language::derivable_strings(&before, 6, 10_000);
        assert_eq!(crate::language::derivable_strings(&after, 6, 10_000), reference);
        assert!(reference.contains(""));
        assert!(reference.contains("aabb"));
    }
}
