//! In-memory filtering, sorting and pagination for dashboard tables.
//!
//! Every admin table fetches its full list once and then narrows it
//! client-side; `TableQuery` holds the knobs the table header exposes.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::Error;

/// Comparable cell value. Text is compared case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl SortValue {
    pub fn text(s: &str) -> Self { SortValue::Text(s.to_lowercase()) }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortValue::Flag(a), SortValue::Flag(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

pub trait TableRow {
    /// Cells the free-text search box matches against.
    fn search_cells(&self) -> Vec<&str>;

    /// Value of a sortable column, `None` for unknown columns or empty cells.
    fn sort_value(&self, column: &str) -> Option<SortValue>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl FromStr for SortSpec {
    type Err = Error;

    /// Parses `column` or `column:asc` / `column:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, dir) = match s.split_once(':') {
            Some((c, d)) => (c.trim(), Some(d.trim())),
            None => (s.trim(), None),
        };
        if column.is_empty() {
            return Err(Error::Operation("sort column must not be empty".into()));
        }
        let direction = match dir.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Ascending,
            Some("desc") => SortDirection::Descending,
            Some(other) => return Err(Error::Operation(format!("unknown sort direction '{}'", other))),
        };
        Ok(Self { column: column.to_string(), direction })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self { Self::new(10) }
}

#[derive(Debug)]
pub struct TablePage<'a, T> {
    pub rows: Vec<&'a T>,
    /// Rows matching the search, across all pages.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl TableQuery {
    pub fn new(page_size: usize) -> Self { Self { search: None, sort: None, page: 1, page_size: page_size.max(1) } }

    pub fn search(mut self, needle: &str) -> Self {
        let needle = needle.trim();
        self.search = if needle.is_empty() { None } else { Some(needle.to_lowercase()) };
        self.page = 1;
        self
    }

    pub fn sort(mut self, spec: SortSpec) -> Self { self.sort = Some(spec); self }

    pub fn page(mut self, page: usize) -> Self { self.page = page.max(1); self }

    pub fn apply<'a, T: TableRow>(&self, rows: &'a [T]) -> TablePage<'a, T> {
        let mut matched: Vec<&T> = match &self.search {
            Some(needle) => rows
                .iter()
                .filter(|r| r.search_cells().iter().any(|c| c.to_lowercase().contains(needle.as_str())))
                .collect(),
            None => rows.iter().collect(),
        };

        if let Some(spec) = &self.sort {
            matched.sort_by(|a, b| {
                match (a.sort_value(&spec.column), b.sort_value(&spec.column)) {
                    (Some(x), Some(y)) => {
                        let ord = x.compare(&y);
                        if spec.direction == SortDirection::Descending { ord.reverse() } else { ord }
                    }
                    // empty cells always sink to the bottom
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }

        let total = matched.len();
        let page_size = self.page_size.max(1);
        let total_pages = total.div_ceil(page_size).max(1);
        let page = self.page.clamp(1, total_pages);
        let rows = matched.into_iter().skip((page - 1) * page_size).take(page_size).collect();
        TablePage { rows, total, page, total_pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, f64);

    impl TableRow for Row {
        fn search_cells(&self) -> Vec<&str> { vec![self.0] }
        fn sort_value(&self, column: &str) -> Option<SortValue> {
            match column {
                "name" => Some(SortValue::text(self.0)),
                "score" => Some(SortValue::Number(self.1)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row("delta", 4.0), Row("Alpha", 1.0), Row("charlie", 3.0), Row("bravo", 2.0), Row("alphonse", 5.0)]
    }

    #[test]
    fn search_is_case_insensitive() {
        let rows = rows();
        let page = TableQuery::new(10).search("ALP").apply(&rows);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn sort_descending_then_paginate() {
        let rows = rows();
        let q = TableQuery::new(2).sort("score:desc".parse().unwrap()).page(2);
        let page = q.apply(&rows);
        assert_eq!(page.total_pages, 3);
        let names: Vec<_> = page.rows.iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["charlie", "bravo"]);
    }

    #[test]
    fn page_past_end_is_clamped() {
        let rows = rows();
        let page = TableQuery::new(2).page(99).apply(&rows);
        assert_eq!(page.page, 3);
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn empty_table_has_one_page() {
        let rows: Vec<Row> = Vec::new();
        let page = TableQuery::new(5).apply(&rows);
        assert_eq!((page.total, page.page, page.total_pages), (0, 1, 1));
    }

    #[test]
    fn bad_sort_direction_rejected() {
        assert!("name:sideways".parse::<SortSpec>().is_err());
        assert!(":desc".parse::<SortSpec>().is_err());
    }
}
