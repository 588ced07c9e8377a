/*
    This module writes the normalization log artifact: plain info lines and
    titled grammar snapshots, one block per pipeline stage
*/

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::grammar::Grammar;

pub struct Trace {
    out: Box<dyn Write>,
}

fn write_snapshot(out: &mut dyn Write, title: &str, grammar: &Grammar) -> io::Result<()> {
    writeln!(out, "==== [{}] ====", title)?;
    writeln!(out, "{}", grammar)
}

impl Trace {
    pub fn create(path: &Path) -> io::Result<Trace> {
        Ok(Trace {
            out: Box::new(BufWriter::new(File::create(path)?)),
        })
    }

    // Discards everything written; lets pipeline tests run without files
    pub fn sink() -> Trace {
        Trace {
            out: Box::new(io::sink()),
        }
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }

    pub fn snapshot(&mut self, title: &str, grammar: &Grammar) -> io::Result<()> {
        write_snapshot(&mut self.out, title, grammar)
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}
