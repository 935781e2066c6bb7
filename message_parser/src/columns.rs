use std::ops::Range;
use std::str::FromStr;

/// A line of a message file split into characters.
///
/// Message files are laid out in fixed columns. Columns count characters rather than bytes, so a
/// multi-byte character in a name or a path does not shift the fields that follow it.
///
/// Ranges reaching past the end of the line are clamped, a short line yields a short or empty
/// field.
#[derive(Debug, Clone)]
pub struct Columns {
    chars: Vec<char>,
}

impl Columns {
    pub fn new(line: &str) -> Self {
        Self {
            chars: line.chars().collect(),
        }
    }

    /// The raw characters in `range`
    pub fn raw(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// The field in `range` with surrounding spaces removed
    pub fn text(&self, range: Range<usize>) -> String {
        self.raw(range).trim_matches(' ').to_string()
    }

    /// A phase name in `range` with the trailing dot fill removed
    ///
    /// `"  Stiffness matrix ......."` becomes `"Stiffness matrix"`.
    pub fn name(&self, range: Range<usize>) -> String {
        self.raw(range)
            .trim_matches(' ')
            .trim_end_matches('.')
            .trim_end_matches(' ')
            .to_string()
    }

    /// The integer in `range`, or zero when the field does not hold one
    pub fn int(&self, range: Range<usize>) -> i64 {
        self.number(range)
    }

    /// The floating point number in `range`, or zero when the field does not hold one
    pub fn float(&self, range: Range<usize>) -> f64 {
        self.number(range)
    }

    fn number<T>(&self, range: Range<usize>) -> T
    where
        T: FromStr + Default,
    {
        let field = self.text(range);
        field.parse().unwrap_or_else(|_| {
            trace!("Unparsable numeric field {field:?}, using default");
            T::default()
        })
    }
}
