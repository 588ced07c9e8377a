use std::path::PathBuf;
use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// Where in the input an error was detected; line 0 means the file as a whole
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn in_file(file: &PathBuf) -> Self {
        Location {
            file: file.clone(),
            line: 0
        }
    }

    pub fn at_line(file: &PathBuf, line: usize) -> Self {
        Location {
            file: file.clone(),
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;
