/*
    The Greibach finishing steps: nonterminal ordering, substitution by
    order, and immediate left-recursion elimination. The result is best
    effort: indirect left recursion the ordering cannot untangle is
    reported, not fixed.
*/

use std::collections::BTreeSet;

use crate::grammar::{Alternative, Grammar, Rewrite, Symbol};

// Safety valve for the substitution fixed point, whose termination is not
// structurally guaranteed
pub const MAX_SUBSTITUTION_ROUNDS: u32 = 2000;

// The start symbol first, every other nonterminal in name order
pub fn nonterminal_order(grammar: &Grammar) -> Vec<String> {
    let mut order = vec![grammar.start_symbol.clone()];
    order.extend(
        grammar
            .nonterminals
            .iter()
            .filter(|name| **name != grammar.start_symbol)
            .cloned(),
    );
    order
}

// Inlines, until nothing changes, every alternative that begins with a
// nonterminal placed earlier in the order than its left-hand side.
// Returns the number of rounds and whether the loop converged before the
// round cap.
pub fn substitute_by_order(grammar: &mut Grammar, order: &[String]) -> (u32, bool) {
    let mut rounds = 0;
    loop {
        if rounds >= MAX_SUBSTITUTION_ROUNDS {
            return (rounds, false);
        }
        rounds += 1;

        let mut changed = false;
        for (position, lhs) in order.iter().enumerate() {
            let Some(rewrite) = grammar.rules.get(lhs) else {
                continue;
            };
            let earlier = &order[..position];

            let mut replacement = Rewrite::new();
            let mut rewritten = false;
            for alternative in rewrite {
                match alternative.first() {
                    Some(Symbol::Nonterminal(first)) if earlier.contains(first) => {
                        let inlined: Vec<Alternative> = grammar
                            .alternatives(first)
                            .map(|beta| beta.iter().chain(&alternative[1..]).cloned().collect())
                            .collect();
                        if inlined.is_empty() {
                            // the leading symbol has no rules to inline
                            replacement.insert(alternative.clone());
                        } else {
                            replacement.extend(inlined);
                            rewritten = true;
                        }
                    }
                    _ => {
                        replacement.insert(alternative.clone());
                    }
                }
            }
            if rewritten {
                grammar.rules.insert(lhs.clone(), replacement);
                changed = true;
            }
        }

        if !changed {
            return (rounds, true);
        }
    }
}

// Standard immediate-left-recursion removal: alternatives A -> A τ move
// their tails to a fresh A', A -> β becomes A -> β A', and A' derives every
// tail followed by A' or the empty string. Returns the (A, A') pairs.
pub fn remove_left_recursion(grammar: &mut Grammar, order: &[String]) -> Vec<(String, String)> {
    let mut eliminated = Vec::new();

    for lhs in order {
        let Some(rewrite) = grammar.rules.get(lhs) else {
            continue;
        };
        let (recursive, other): (Vec<Alternative>, Vec<Alternative>) =
            rewrite.iter().cloned().partition(|alternative| {
                matches!(alternative.first(), Some(Symbol::Nonterminal(first)) if first == lhs)
            });
        if recursive.is_empty() {
            continue;
        }

        let prime = grammar.fresh_nonterminal(&format!("{}_p", lhs));

        let mut rewritten = Rewrite::new();
        for beta in other {
            let mut extended = beta;
            extended.push(Symbol::Nonterminal(prime.clone()));
            rewritten.insert(extended);
        }
        grammar.rules.insert(lhs.clone(), rewritten);

        let mut prime_rewrite = Rewrite::new();
        for alternative in recursive {
            let tail = alternative[1..].to_vec();
            if tail.is_empty() {
                continue; // a lone A -> A derives nothing
            }
            let mut extended = tail;
            extended.push(Symbol::Nonterminal(prime.clone()));
            prime_rewrite.insert(extended);
        }
        prime_rewrite.insert(Alternative::new());
        grammar.rules.insert(prime.clone(), prime_rewrite);

        eliminated.push((lhs.clone(), prime));
    }

    eliminated
}

// The (left-hand side, leading nonterminal) pairs that keep the grammar
// short of Greibach form: the leading nonterminal has no terminal-first
// alternative of its own, so no further substitution could ground it
pub fn unresolved_pairs(grammar: &Grammar) -> Vec<(String, String)> {
    let mut unresolved = BTreeSet::new();
    for (lhs, rewrite) in &grammar.rules {
        for alternative in rewrite {
            if let Some(Symbol::Nonterminal(first)) = alternative.first() {
                let groundable = grammar
                    .alternatives(first)
                    .any(|alt| matches!(alt.first(), Some(Symbol::Terminal(_))));
                if !groundable {
                    unresolved.insert((lhs.clone(), first.clone()));
                }
            }
        }
    }
    unresolved.into_iter().collect()
}
