use serde::{Deserialize, Serialize};

/// `?page=N` on the listing endpoints. Pages are 1-based, like the
/// paginators most blog frontends expect.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
}

impl PageQuery {
    pub fn offset(&self, page_size: i64) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        (page, page.saturating_sub(1).saturating_mul(page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::PageQuery;

    #[test]
    fn missing_zero_and_negative_pages_all_mean_the_first_page() {
        for page in [None, Some(0), Some(-3)] {
            assert_eq!(PageQuery { page }.offset(10), (1, 0));
        }
        assert_eq!(PageQuery { page: Some(3) }.offset(10), (3, 20));
    }

    #[test]
    fn a_huge_page_number_saturates_instead_of_overflowing() {
        let (page, offset) = PageQuery {
            page: Some(i64::MAX),
        }
        .offset(10);
        assert_eq!(page, i64::MAX);
        assert_eq!(offset, i64::MAX);
    }
}
