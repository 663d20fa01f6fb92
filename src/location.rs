use std::fmt;
use std::path::{Path, PathBuf};

/// Where a diagnostic is anchored: a file, plus the physical-line span the
/// logical line covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    file: PathBuf,
    span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    /// The file as a whole, with no particular line.
    File,
    /// An inclusive range of physical line numbers; first and last are
    /// equal for statements that fit on one physical line.
    Lines(usize, usize),
    /// The end-of-file sentinel.
    Eof,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, first: usize, last: usize) -> Self {
        Self {
            file: file.into(),
            span: Span::Lines(first, last),
        }
    }

    pub fn whole_file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            span: Span::File,
        }
    }

    pub fn eof(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            span: Span::Eof,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.span {
            Span::File => write!(f, "{}", self.file.display()),
            Span::Lines(first, last) if first == last => {
                write!(f, "{}:{first}", self.file.display())
            }
            Span::Lines(first, last) => write!(f, "{}:{first}--{last}", self.file.display()),
            Span::Eof => write!(f, "{}:EOF", self.file.display()),
        }
    }
}
