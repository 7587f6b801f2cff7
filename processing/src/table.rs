use std::collections::HashMap;
use strum_macros::Display;

/// One rendered output cell; `None` is written as an empty field.
pub type Cell = Option<String>;

/// A flattened record destined for exactly one output table.
pub trait Row {
    /// Column names in output order.
    const COLUMNS: &'static [&'static str];

    /// One cell per entry of [`Row::COLUMNS`], in the same order.
    fn cells(&self) -> Vec<Cell>;
}

/// Whether an empty table is fatal when the tables are validated before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Requirement {
    Required,
    Optional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
    requirement: Requirement,
}

impl Table {
    pub fn from_rows<R: Row>(name: impl Into<String>, rows: &[R]) -> Self {
        let table = Self {
            name: name.into(),
            columns: R::COLUMNS.to_vec(),
            rows: rows.iter().map(R::cells).collect(),
            requirement: Requirement::Required,
        };
        tracing::debug!(table = %table.name, rows = table.rows.len(), "Created table");
        table
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Like [`Table::from_rows`], but skips every row equal to an earlier one.
    ///
    /// Rows are compared by their typed values, so `1` and `"1"` stay distinct
    /// even though both render as the same cell. First-seen order is kept.
    pub fn from_distinct_rows<R: Row + PartialEq>(name: impl Into<String>, rows: &[R]) -> Self {
        let mut kept: Vec<&R> = Vec::with_capacity(rows.len());
        let mut by_cells: HashMap<Vec<Cell>, Vec<usize>> = HashMap::with_capacity(rows.len());

        for row in rows {
            let bucket = by_cells.entry(row.cells()).or_default();
            if bucket.iter().any(|&index| kept[index] == row) {
                continue;
            }
            bucket.push(kept.len());
            kept.push(row);
        }

        let table = Self {
            name: name.into(),
            columns: R::COLUMNS.to_vec(),
            rows: kept.into_iter().map(R::cells).collect(),
            requirement: Requirement::Required,
        };
        tracing::debug!(
            table = %table.name,
            rows = table.rows.len(),
            removed = rows.len() - table.rows.len(),
            "Created table"
        );
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Converts a normalizer's accumulated views into their output tables, in write order.
pub trait IntoTables {
    fn into_tables(self) -> Vec<Table>;
}
