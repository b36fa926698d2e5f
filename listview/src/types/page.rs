use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination echoed to the server on every fetch.
///
/// `current` and `page_size` are client-driven; `total` comes from the last
/// committed fetch minus any local deletes since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(current: u32, page_size: u32) -> Self {
        Self {
            current: current.max(1),
            page_size: page_size.max(1),
            total: 0,
        }
    }

    /// Number of pages the current total spans (at least one).
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size)).max(1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One fetched page of a remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<R> {
    pub rows: Vec<R>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_to_one() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.current, 1);
        assert_eq!(p.page_size, 1);
    }

    #[test]
    fn test_page_count() {
        let mut p = Pagination::new(1, 10);
        assert_eq!(p.page_count(), 1);
        p.total = 25;
        assert_eq!(p.page_count(), 3);
        p.total = 30;
        assert_eq!(p.page_count(), 3);
    }
}
