//! Canonical list request parameters.

use std::collections::BTreeMap;

use crate::columns::FilterPrecedence;
use crate::types::{Pagination, SortOrder};

/// Server-side sort requested by a column header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Option<String>,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: Some(field.into()),
            order,
        }
    }
}

/// The single free-text search slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    pub column: Option<String>,
    pub text: Option<String>,
}

impl SearchSpec {
    pub fn new(column: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            text: Some(text.into()),
        }
    }

    /// Column and text, when both are set and the text is non-empty.
    pub fn active(&self) -> Option<(&str, &str)> {
        match (self.column.as_deref(), self.text.as_deref()) {
            (Some(column), Some(text)) if !column.is_empty() && !text.is_empty() => {
                Some((column, text))
            }
            _ => None,
        }
    }
}

/// A non-search selector pinning one field (e.g. a type dropdown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFilter {
    pub field: String,
    pub value: String,
}

impl FixedFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// The filter actually sent with one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    None,
    FreeText { column: String, text: String },
    Fixed { field: String, value: String },
}

impl Filter {
    /// `(field, value)` pair for the wire.
    pub fn field_value(&self) -> Option<(&str, &str)> {
        match self {
            Filter::None => None,
            Filter::FreeText { column, text } => Some((column, text)),
            Filter::Fixed { field, value } => Some((field, value)),
        }
    }

    /// Pick exactly one filter for a fetch.
    pub fn choose(
        search: &SearchSpec,
        selector: Option<&FixedFilter>,
        precedence: FilterPrecedence,
    ) -> Self {
        let free_text = search.active().map(|(column, text)| Filter::FreeText {
            column: column.to_string(),
            text: text.to_string(),
        });
        let fixed = selector.map(|s| Filter::Fixed {
            field: s.field.clone(),
            value: s.value.clone(),
        });
        let chosen = match precedence {
            FilterPrecedence::SelectorFirst => fixed.or(free_text),
            FilterPrecedence::SearchFirst => free_text.or(fixed),
        };
        chosen.unwrap_or_default()
    }
}

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub filter: Filter,
    pub domain: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn build(
        pagination: &Pagination,
        sort: &SortSpec,
        search: &SearchSpec,
        selector: Option<&FixedFilter>,
        domain: &BTreeMap<String, String>,
        precedence: FilterPrecedence,
    ) -> Self {
        // A field without a direction means server default order.
        let (sort_field, sort_order) = match (&sort.field, sort.order) {
            (Some(field), order) if !field.is_empty() && order != SortOrder::None => {
                (Some(field.clone()), order)
            }
            _ => (None, SortOrder::None),
        };

        Self {
            page: pagination.current.max(1),
            page_size: pagination.page_size.max(1),
            sort_field,
            sort_order,
            filter: Filter::choose(search, selector, precedence),
            domain: domain.clone(),
        }
    }

    /// Query-string pairs for `GET get-<kind>`.
    pub fn to_pairs(&self, scope: &str) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("owner".to_string(), scope.to_string()),
            ("p".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];
        if let Some((field, value)) = self.filter.field_value() {
            pairs.push(("field".to_string(), field.to_string()));
            pairs.push(("value".to_string(), value.to_string()));
        }
        if let (Some(field), Some(order)) = (&self.sort_field, self.sort_order.as_param()) {
            pairs.push(("sortField".to_string(), field.clone()));
            pairs.push(("sortOrder".to_string(), order.to_string()));
        }
        for (key, value) in &self.domain {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}
