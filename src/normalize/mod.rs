/*
    This module turns grammars into normal forms

    Both pipelines run a fixed sequence of language-preserving passes, each
    relying on the invariants the previous one established, and snapshot
    the grammar to the trace after every stage. The passes themselves do no
    I/O.
*/

pub mod sets;
pub mod epsilon;
pub mod unit;
pub mod useless;
pub mod cnf;
pub mod gnf;

use std::collections::BTreeSet;
use std::io;

use itertools::Itertools;

use crate::grammar::Grammar;
use crate::trace::Trace;
use cnf::{binarize, isolate_terminals};
use epsilon::remove_epsilon;
use unit::remove_units;
use useless::remove_useless;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GnfStatus {
    Achieved,
    // some alternative still begins with an ungroundable nonterminal, or
    // the substitution hit its round cap; the grammar is returned anyway
    Partial,
}

fn render_set(names: &BTreeSet<String>) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.iter().join(", ")
    }
}

// The stages shared by both normal forms: ε-elimination, unit-elimination,
// useless-symbol removal and terminal isolation, in that order
fn prepare(grammar: &mut Grammar, trace: &mut Trace) -> io::Result<()> {
    let report = remove_epsilon(grammar);
    trace.info(&format!("Nullable variables: {}", render_set(&report.nullable)))?;
    if let Some(fresh_start) = &report.fresh_start {
        trace.info(&format!(
            "Start symbol was nullable: '{}' is the new start and keeps the only ε-alternative",
            fresh_start
        ))?;
    }
    trace.snapshot("After epsilon-elimination", grammar)?;

    remove_units(grammar);
    trace.snapshot("After unit-elimination", grammar)?;

    let report = remove_useless(grammar);
    trace.info(&format!("Generating variables: {}", render_set(&report.generating)))?;
    trace.info(&format!("Reachable variables: {}", render_set(&report.reachable)))?;
    trace.snapshot("After useless-symbol removal", grammar)?;

    isolate_terminals(grammar);
    trace.snapshot("After terminal isolation", grammar)?;

    Ok(())
}

pub fn to_cnf(grammar: &mut Grammar, trace: &mut Trace) -> io::Result<()> {
    trace.snapshot("Original grammar", grammar)?;
    prepare(grammar, trace)?;

    binarize(grammar);
    trace.snapshot("After binarization", grammar)?;

    trace.info("Normalization finished: grammar is in Chomsky Normal Form.")?;
    trace.snapshot("Grammar in CNF", grammar)?;
    Ok(())
}

pub fn to_gnf(grammar: &mut Grammar, trace: &mut Trace) -> io::Result<GnfStatus> {
    trace.snapshot("Original grammar", grammar)?;
    prepare(grammar, trace)?;

    let order = gnf::nonterminal_order(grammar);
    trace.info(&format!("Nonterminal order for substitution: {}", order.iter().join(", ")))?;

    let (rounds, converged) = gnf::substitute_by_order(grammar, &order);
    trace.info(&format!("Substitution by order finished (rounds = {}).", rounds))?;
    if !converged {
        trace.info("WARNING: substitution stopped at the round cap without converging.")?;
    }
    trace.snapshot("After substitution by order", grammar)?;

    for (lhs, prime) in gnf::remove_left_recursion(grammar, &order) {
        trace.info(&format!("Left recursion removed for {} by introducing {}", lhs, prime))?;
    }
    trace.snapshot("After left-recursion elimination", grammar)?;

    let unresolved = gnf::unresolved_pairs(grammar);
    let status = if unresolved.is_empty() && converged {
        trace.info("Every alternative can start with a terminal: GNF achieved.")?;
        GnfStatus::Achieved
    } else {
        for (lhs, first) in &unresolved {
            trace.info(&format!(
                "Unresolved: {} still begins with {}, which has no terminal-first alternative",
                lhs, first
            ))?;
        }
        trace.info("WARNING: GNF not fully achieved; the grammar above is the best effort.")?;
        GnfStatus::Partial
    };
    trace.snapshot("Grammar after GNF attempt", grammar)?;
    Ok(status)
}
