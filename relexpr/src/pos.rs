use std::fmt;
use std::sync::Arc;

/// A range in a source file.
///
/// Lines (`y`, `y2`) and columns (`x`, `x2`) are 1-based and inclusive. A position is
/// attached to every expression node and every token so diagnostics can always point back
/// into the model file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pos {
    filename: Arc<str>,
    x: u32,
    y: u32,
    x2: u32,
    y2: u32,
}

impl Pos {
    /// A single-character position.
    pub fn new(filename: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            x: column,
            y: line,
            x2: column,
            y2: line,
        }
    }

    /// A position spanning from `(line, column)` to `(line2, column2)`.
    pub fn span(
        filename: impl Into<Arc<str>>,
        line: u32,
        column: u32,
        line2: u32,
        column2: u32,
    ) -> Self {
        Self {
            filename: filename.into(),
            x: column,
            y: line,
            x2: column2,
            y2: line2,
        }
    }

    /// Position used when nothing better is known.
    pub fn unknown() -> Self {
        Self::new("", 1, 1)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn line(&self) -> u32 {
        self.y
    }

    pub fn column(&self) -> u32 {
        self.x
    }

    pub fn end_line(&self) -> u32 {
        self.y2
    }

    pub fn end_column(&self) -> u32 {
        self.x2
    }

    /// Smallest position covering both `self` and `other`.
    ///
    /// Positions from different files are not merged; `self` is returned unchanged.
    pub fn merge(&self, other: &Pos) -> Pos {
        if self.filename != other.filename {
            return self.clone();
        }
        let (y, x) = (self.y, self.x).min((other.y, other.x));
        let (y2, x2) = (self.y2, self.x2).max((other.y2, other.x2));
        Pos {
            filename: self.filename.clone(),
            x,
            y,
            x2,
            y2,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filename.is_empty() {
            write!(f, "line {}, column {}", self.y, self.x)
        } else {
            write!(
                f,
                "line {}, column {}, filename={}",
                self.y, self.x, self.filename
            )
        }
    }
}
