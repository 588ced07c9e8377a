/*
    This module reads grammar description files

    The format is block structured: a Variaveis { ... } list of nonterminals,
    an Alfabeto { ... } list of terminals, an Inicial = X start designation
    and a Regras: section with one `LHS -> alt | alt` rule per line. Reading
    is tolerant: undeclared rule heads and rule characters are added to the
    grammar with a warning instead of rejecting the file.
*/

mod lexer;
mod verifier;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::error_handling::*;
use crate::grammar::{Alternative, Grammar};
use lexer::lex_alternative;
use verifier::verify_grammar;

#[derive(Debug)]
pub enum ReadErrorType {
    // A required section keyword never appears in the file
    MissingSection(&'static str),
    // A section keyword was found but its brace-delimited list was not
    MissingBraces(&'static str),
    // The start line designates no symbol
    MissingStartSymbol,
    // A name is declared both as a variable and as a terminal
    AmbiguousSymbol(String),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for ReadErrorType {}

impl PartialEq for ReadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ReadErrorType::FileError(a), ReadErrorType::FileError(b)) => a.kind() == b.kind(),
            (ReadErrorType::MissingSection(a), ReadErrorType::MissingSection(b)) => a == b,
            (ReadErrorType::MissingBraces(a), ReadErrorType::MissingBraces(b)) => a == b,
            (ReadErrorType::AmbiguousSymbol(a), ReadErrorType::AmbiguousSymbol(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for ReadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadErrorType::MissingSection(section) => write!(f, "Section `{}` not found", section),
            ReadErrorType::MissingBraces(section) => write!(f, "Section `{}` is missing its {{ }} list", section),
            ReadErrorType::MissingStartSymbol => write!(f, "No start symbol designated"),
            ReadErrorType::AmbiguousSymbol(name) => write!(f, "`{}` is declared both as a variable and as a terminal", name),
            ReadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type ReadError = Error<ReadErrorType>;
pub type ReadErrors = Errors<ReadErrorType>;

pub type FileResult<T> = std::result::Result<T, ReadErrors>;

fn io_error(error: std::io::Error, file: &PathBuf) -> ReadError {
    ReadError {
        location: Location::in_file(file),
        error: ReadErrorType::FileError(error)
    }
}

// Finds the first line whose lowered text contains the keyword
fn find_section(lines: &[String], keyword: &str) -> Option<usize> {
    lines.iter().position(|line| line.to_lowercase().contains(keyword))
}

// Collects the text between the `{` at or after `start` and the next `}`,
// spanning physical lines
fn collect_braced_list(lines: &[String], start: usize, section: &'static str) -> Result<String, ReadErrorType> {
    let mut line_iter = lines[start..].iter();
    let mut opened: Option<&str> = None;
    for line in &mut line_iter {
        if let Some(pos) = line.find('{') {
            opened = Some(&line[pos + 1..]);
            break;
        }
    }
    let first = opened.ok_or(ReadErrorType::MissingBraces(section))?;
    if let Some(end) = first.find('}') {
        return Ok(first[..end].to_string());
    }

    let mut collected = first.to_string();
    for line in line_iter {
        collected.push(' ');
        if let Some(end) = line.find('}') {
            collected.push_str(&line[..end]);
            return Ok(collected);
        }
        collected.push_str(line);
    }
    Err(ReadErrorType::MissingBraces(section))
}

// List items may be separated by commas, whitespace or both
fn split_list(collected: &str) -> BTreeSet<String> {
    collected
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// `Inicial = S`, `Start = S` or `Inicial S` all designate S
fn parse_start_designation(line: &str) -> Option<String> {
    let designated = match line.split_once('=') {
        Some((_, after)) => after.trim(),
        None => line.trim().split_once(char::is_whitespace)?.1.trim(),
    };
    (!designated.is_empty()).then(|| designated.to_string())
}

pub fn parse_text(text: &str, path: &PathBuf) -> FileResult<Grammar> {
    // strip per-line comments before anything else
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").to_string())
        .collect();

    let fail = |error: ReadErrorType, line: usize| {
        vec![ReadError {
            location: Location::at_line(path, line),
            error
        }]
    };

    let vars_idx = find_section(&lines, "variave")
        .ok_or_else(|| fail(ReadErrorType::MissingSection("Variaveis"), 0))?;
    let vars = collect_braced_list(&lines, vars_idx, "Variaveis")
        .map_err(|error| fail(error, vars_idx + 1))?;

    let alpha_idx = find_section(&lines, "alfabeto")
        .ok_or_else(|| fail(ReadErrorType::MissingSection("Alfabeto"), 0))?;
    let alpha = collect_braced_list(&lines, alpha_idx, "Alfabeto")
        .map_err(|error| fail(error, alpha_idx + 1))?;

    let start_idx = find_section(&lines, "inicial")
        .or_else(|| find_section(&lines, "start"))
        .ok_or_else(|| fail(ReadErrorType::MissingSection("Inicial"), 0))?;
    let start_symbol = parse_start_designation(&lines[start_idx])
        .ok_or_else(|| fail(ReadErrorType::MissingStartSymbol, start_idx + 1))?;

    let rules_idx = find_section(&lines, "regras")
        .ok_or_else(|| fail(ReadErrorType::MissingSection("Regras"), 0))?;

    let mut grammar = Grammar::new(&start_symbol);
    grammar.nonterminals = split_list(&vars);
    grammar.terminals = split_list(&alpha);
    if !grammar.is_nonterminal(&start_symbol) {
        warn!("start symbol '{}' was not declared in Variaveis, adding it", start_symbol);
        grammar.nonterminals.insert(start_symbol);
    }

    for line in &lines[rules_idx + 1..] {
        let Some((lhs, rhs)) = line.split_once("->") else {
            continue;
        };
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        if lhs.is_empty() || rhs.is_empty() {
            continue;
        }
        if !grammar.is_nonterminal(lhs) {
            warn!("rule head '{}' was not declared in Variaveis, adding it", lhs);
            grammar.nonterminals.insert(lhs.to_string());
        }
        for alt in rhs.split('|') {
            let alt = alt.trim();
            if alt.is_empty() {
                continue;
            }
            let alternative = if alt == "&" {
                // the literal & is the empty string
                Alternative::new()
            } else {
                lex_alternative(alt, &grammar.nonterminals, &mut grammar.terminals)
            };
            grammar.add_rule(lhs, alternative);
        }
    }

    verify_grammar(&grammar, path)?;

    Ok(grammar)
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let text = fs::read_to_string(path).map_err(|e| vec![io_error(e, path)])?;
    parse_text(&text, path)
}
