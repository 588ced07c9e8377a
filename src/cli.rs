use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar description
    pub file: PathBuf,

    /// Normal form to produce
    #[arg(value_enum)]
    pub mode: Mode,

    /// File to write the transformation log to
    pub log: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Chomsky Normal Form
    Cnf,
    /// Greibach Normal Form (best effort)
    Gnf,
}
