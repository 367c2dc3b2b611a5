//! Raw tables as delivered by the loader.
//!
//! A [`RawTable`] is a named, ordered set of columns keyed by a
//! normalized header. Headers follow the Title Case convention: trimmed,
//! first letter of each word upper-cased, the rest lower-cased.
//! Nothing here is typed beyond [`Cell`]; typing happens in
//! [`crate::schema`].

use serde::{Deserialize, Serialize};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Whether the cell carries no value (empty or whitespace-only text).
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric value, parsing text leniently (`"1500.50"`, `"1500,50"`).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) => None,
            Cell::Text(s) => {
                let t = s.trim();
                t.parse::<f64>()
                    .ok()
                    .or_else(|| t.replace(',', ".").parse::<f64>().ok())
                    .filter(|n| n.is_finite())
            }
            Cell::Empty => None,
        }
    }

    /// Text rendering. Integral numbers render without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Empty => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Title Case header.
    pub header: String,
    pub cells: Vec<Cell>,
}

impl Column {
    /// Whether every non-empty cell is a number and at least one is.
    pub fn is_numeric(&self) -> bool {
        let mut seen = false;
        for cell in &self.cells {
            match cell {
                Cell::Number(_) => seen = true,
                c if c.is_empty() => {}
                _ => return false,
            }
        }
        seen
    }
}

/// A loaded table: ordered columns keyed by normalized header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Source name (sheet name) for diagnostics.
    pub name: String,
    pub columns: Vec<Column>,
}

impl RawTable {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Appends a column. The header is normalized to Title Case.
    pub fn with_column<C: Into<Cell>>(
        mut self,
        header: &str,
        cells: impl IntoIterator<Item = C>,
    ) -> Self {
        self.push_column(header, cells.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a column in place. The header is normalized to Title Case.
    pub fn push_column(&mut self, header: &str, cells: Vec<Cell>) {
        self.columns.push(Column {
            header: normalize_header(header),
            cells,
        });
    }

    /// First column whose header matches `header` after normalization.
    pub fn column(&self, header: &str) -> Option<&Column> {
        let wanted = normalize_header(header);
        self.columns.iter().find(|c| c.header == wanted)
    }

    /// First column matching any of the candidate headers, in candidate order.
    pub fn find_column(&self, candidates: &[&str]) -> Option<&Column> {
        candidates.iter().find_map(|h| self.column(h))
    }

    /// Number of data rows (length of the longest column).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Cell at `row` in `column`, `Cell::Empty` past the column end.
    pub fn cell<'a>(column: &'a Column, row: usize) -> &'a Cell {
        const EMPTY: &Cell = &Cell::Empty;
        column.cells.get(row).unwrap_or(EMPTY)
    }
}

/// Title Case: trim, then upper-case the first letter of each alphabetic
/// run and lower-case the rest.
///
/// ```
/// use u_lead_queue::table::title_case;
/// assert_eq!(title_case("  tipo CLIENTE "), "Tipo Cliente");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.trim().chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Header normalization applied to every table.
pub fn normalize_header(header: &str) -> String {
    title_case(header)
}

/// Consultant identifier normalization: trimmed, upper-cased.
///
/// Must be applied identically to every table before joining.
pub fn normalize_consultant_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}
