//! Per-column table configuration.
//!
//! A column is sorted either by the server (a new page is fetched) or by a
//! comparator over the rows already on screen. The mode is fixed when the
//! binding is built, so the two can never be mixed on one column.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::error::{ConsoleError, Result};
use crate::types::ResourceKind;

/// Orders two rows of the current page.
pub type Comparator<R> = fn(&R, &R) -> Ordering;

/// Inputs for building a default row when the Add button is pressed.
#[derive(Debug, Clone)]
pub struct NewRow {
    /// Organization the new row belongs to.
    pub owner: String,
    /// Random suffix for the suggested name.
    pub suffix: String,
    /// Creation timestamp (RFC 3339).
    pub now: String,
}

/// Builds the default row for a resource kind.
pub type RowFactory<R> = fn(&NewRow) -> R;

/// How a column header click is handled.
pub enum SortMode<R> {
    Unsorted,
    /// Round-trips through the query model and fetches a new page.
    Server,
    /// Reorders the current page only.
    Client(Comparator<R>),
}

impl<R> Clone for SortMode<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SortMode<R> {}

impl<R> std::fmt::Debug for SortMode<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Unsorted => write!(f, "Unsorted"),
            SortMode::Server => write!(f, "Server"),
            SortMode::Client(_) => write!(f, "Client"),
        }
    }
}

/// One table column.
pub struct Column<R> {
    pub key: &'static str,
    pub title: &'static str,
    pub sort: SortMode<R>,
    pub searchable: bool,
    /// Allowed values for a single-select filter on this column; empty means any.
    pub options: &'static [&'static str],
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            title: self.title,
            sort: self.sort,
            searchable: self.searchable,
            options: self.options,
        }
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("sort", &self.sort)
            .field("searchable", &self.searchable)
            .field("options", &self.options)
            .finish()
    }
}

impl<R> Column<R> {
    pub fn new(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            sort: SortMode::Unsorted,
            searchable: false,
            options: &[],
        }
    }

    pub fn server_sort(mut self) -> Self {
        self.sort = SortMode::Server;
        self
    }

    pub fn client_sort(mut self, cmp: Comparator<R>) -> Self {
        self.sort = SortMode::Client(cmp);
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }
}

/// Which filter wins when both a selector and a free-text search are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPrecedence {
    #[default]
    SelectorFirst,
    SearchFirst,
}

/// Everything a list page needs to know about its resource.
pub struct TableBinding<R> {
    pub kind: ResourceKind,
    columns: Vec<Column<R>>,
    pub precedence: FilterPrecedence,
    pub factory: Option<RowFactory<R>>,
    /// Domain parameters sent with every fetch until changed (e.g. session status).
    pub domain_defaults: BTreeMap<String, String>,
}

impl<R> Clone for TableBinding<R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            columns: self.columns.clone(),
            precedence: self.precedence,
            factory: self.factory,
            domain_defaults: self.domain_defaults.clone(),
        }
    }
}

impl<R> std::fmt::Debug for TableBinding<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableBinding")
            .field("kind", &self.kind)
            .field("columns", &self.columns.iter().map(|c| c.key).collect::<Vec<_>>())
            .field("precedence", &self.precedence)
            .field("domain_defaults", &self.domain_defaults)
            .finish()
    }
}

impl<R> TableBinding<R> {
    /// Build a binding, rejecting empty or duplicate column keys.
    pub fn new(kind: ResourceKind, columns: Vec<Column<R>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if column.key.is_empty() {
                return Err(ConsoleError::Binding(format!("{kind}: empty column key")));
            }
            if !seen.insert(column.key) {
                return Err(ConsoleError::Binding(format!(
                    "{kind}: duplicate column {}",
                    column.key
                )));
            }
        }
        Ok(Self {
            kind,
            columns,
            precedence: FilterPrecedence::default(),
            factory: None,
            domain_defaults: BTreeMap::new(),
        })
    }

    pub fn with_precedence(mut self, precedence: FilterPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_factory(mut self, factory: RowFactory<R>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn with_domain_default(mut self, key: &str, value: &str) -> Self {
        self.domain_defaults.insert(key.to_string(), value.to_string());
        self
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Result<&Column<R>> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| ConsoleError::UnknownColumn(key.to_string()))
    }

    /// Column that may be sorted by the server.
    pub fn server_sort_column(&self, key: &str) -> Result<&Column<R>> {
        let column = self.column(key)?;
        match column.sort {
            SortMode::Server => Ok(column),
            _ => Err(ConsoleError::NotSortable(key.to_string())),
        }
    }

    /// Comparator of a client-sorted column.
    pub fn comparator(&self, key: &str) -> Result<Comparator<R>> {
        match self.column(key)?.sort {
            SortMode::Client(cmp) => Ok(cmp),
            _ => Err(ConsoleError::NotSortable(key.to_string())),
        }
    }

    /// Column a fixed selector may pin to `value`.
    pub fn select_column(&self, key: &str, value: &str) -> Result<&Column<R>> {
        let column = self.column(key)?;
        if column.options.is_empty() || column.options.contains(&value) {
            Ok(column)
        } else {
            Err(ConsoleError::InvalidOption {
                column: key.to_string(),
                value: value.to_string(),
            })
        }
    }

    pub fn search_column(&self, key: &str) -> Result<&Column<R>> {
        let column = self.column(key)?;
        if column.searchable {
            Ok(column)
        } else {
            Err(ConsoleError::NotSearchable(key.to_string()))
        }
    }
}
