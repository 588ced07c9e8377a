/*
    This module enumerates the strings of a grammar's language, so tests
    can check that normalization passes preserve it
*/

use std::collections::{BTreeSet, VecDeque};

use crate::grammar::{Grammar, Symbol};

// Every terminal string of length at most `max_len` the start symbol
// derives, found by breadth-first leftmost expansion of sentential forms.
// `fuel` bounds the number of forms examined so a pathological grammar
// cannot hang a test.
pub fn derivable_strings(grammar: &Grammar, max_len: usize, fuel: usize) -> BTreeSet<String> {
    let mut strings = BTreeSet::new();
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([vec![Symbol::Nonterminal(grammar.start_symbol.clone())]]);
    let mut remaining = fuel;

    while let Some(form) = queue.pop_front() {
        if remaining == 0 {
            break;
        }
        remaining -= 1;

        let leftmost = form
            .iter()
            .position(|symbol| matches!(symbol, Symbol::Nonterminal(_)));
        let Some(position) = leftmost else {
            // fully terminal: a word of the language
            let text: String = form.iter().map(symbol_text).collect();
            if text.chars().count() <= max_len {
                strings.insert(text);
            }
            continue;
        };

        // the terminal content only ever grows, so forms already past the
        // length bound cannot contribute
        let terminal_len: usize = form
            .iter()
            .filter_map(|symbol| match symbol {
                Symbol::Terminal(name) => Some(name.chars().count()),
                Symbol::Nonterminal(_) => None,
            })
            .sum();
        if terminal_len > max_len {
            continue;
        }

        if let Symbol::Nonterminal(name) = &form[position] {
            for alternative in grammar.alternatives(name) {
                let mut next = form[..position].to_vec();
                next.extend(alternative.iter().cloned());
                next.extend(form[position + 1..].iter().cloned());
                if seen.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }
    }

    strings
}

fn symbol_text(symbol: &Symbol) -> &str {
    match symbol {
        Symbol::Terminal(name) => name,
        Symbol::Nonterminal(name) => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::testing::build;

    fn words(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn enumerates_a_bounded_slice_of_the_language() {
        let grammar = build("S", &["a", "b"], &[("S", "a S b | &")]);
        assert_eq!(
            derivable_strings(&grammar, 4, 10_000),
            words(&["", "ab", "aabb"])
        );
    }

    #[test]
    fn handles_branching_rules() {
        let grammar = build("S", &["a", "b"], &[("S", "a | b | a S")]);
        assert_eq!(
            derivable_strings(&grammar, 2, 10_000),
            words(&["a", "b", "aa", "ab"])
        );
    }

    #[test]
    fn a_nonterminal_without_rules_derives_nothing() {
        let grammar = build("S", &["a"], &[("S", "a D | a")]);
        assert_eq!(derivable_strings(&grammar, 3, 10_000), words(&["a"]));
    }
}
