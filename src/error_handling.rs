use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    // A location covering a whole file rather than one of its lines
    pub fn file(file: PathBuf) -> Self {
        Location { file, line: 0 }
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

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

// Prints every error on its own line of stderr
pub fn report<T: ErrorType>(errors: &Errors<T>) {
    for error in errors {
        eprintln!("{}", error);
    }
}
