use serde::Deserialize;

use crate::server::deserializers::deserialize_page_or_default;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N`, 1-based. Anything that is not an integer means the first page.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page_or_default")]
    pub page: i64,
}

fn first_page() -> i64 {
    1
}

impl Default for PageQuery {
    fn default() -> Self {
        PageQuery { page: first_page() }
    }
}

impl PageQuery {
    /// Items `[10 * (page - 1), 10 * page)`. Pages below 1 and pages past the
    /// end are empty.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(index) = self.page.checked_sub(1).and_then(|i| usize::try_from(i).ok()) else {
            return &[];
        };
        let Some(start) = index.checked_mul(QUESTIONS_PER_PAGE) else {
            return &[];
        };
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
        &items[start..end]
    }

    pub fn page_of<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.slice(items).to_vec()
    }
}
