use std::path::PathBuf;

use crate::error_handling::Location;
use crate::grammar::Grammar;
use super::ReadErrorType::AmbiguousSymbol;
use super::{FileResult, ReadError, ReadErrors};

// The variable and terminal sets must be disjoint. Unlike an undeclared
// symbol, a name declared as both cannot be repaired by guessing: every
// rule mentioning it would change meaning.
pub fn verify_grammar(grammar: &Grammar, file: &PathBuf) -> FileResult<()> {
    let errors: ReadErrors = grammar
        .nonterminals
        .iter()
        .filter(|name| grammar.is_terminal(name))
        .map(|name| ReadError {
            location: Location::in_file(file),
            error: AmbiguousSymbol(name.clone()),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
