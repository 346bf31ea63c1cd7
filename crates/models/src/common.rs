//! Types shared across all six services.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// String key/value metadata attached to most resources.
pub type Metadata = HashMap<String, String>;

/// Free-form structured payload, equivalent to a JSON object.
///
/// `serde_json`'s value type is the tagged-variant representation the wire
/// schema expects; NaN and cyclic values are unconstructible in it, so
/// payload conversion never fails.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// One page of a list operation, plus the collection's total size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u32,
    pub limit: u32,
    pub offset: u32,
}

impl<T> Page<T> {
    /// Whether another page exists past this one.
    pub fn has_more(&self) -> bool {
        self.offset as usize + self.items.len() < self.total_count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_compares_offset_plus_len_to_total() {
        let page = Page {
            items: vec![1, 2, 3, 4, 5],
            total_count: 25,
            limit: 10,
            offset: 20,
        };
        assert!(!page.has_more());

        let first = Page {
            items: (0..10).collect::<Vec<i32>>(),
            total_count: 25,
            limit: 10,
            offset: 0,
        };
        assert!(first.has_more());

        let empty: Page<i32> = Page {
            items: vec![],
            total_count: 0,
            limit: 10,
            offset: 0,
        };
        assert!(!empty.has_more());
    }
}
