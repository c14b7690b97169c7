use crate::database::flights::RECORD_SEPARATOR;

pub const PAGE_SIZE: usize = 5;

/// One bounded slice of a user's flight list. Derived on demand, never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<String>,
    pub page: usize,
    pub page_count: usize,
}

/// Pure page slicing over the record blob. An out-of-range page yields empty
/// items; clamping is the navigation handler's job.
pub fn paginate(raw: &str, page: usize, page_size: usize) -> Page {
    let mut records: Vec<&str> = raw.split(RECORD_SEPARATOR).collect();
    // Trailing separators leave empty artifacts at the end of the split.
    while records.last().is_some_and(|r| r.is_empty()) {
        records.pop();
    }

    let page_count = records.len().div_ceil(page_size).max(1);
    let start = page.saturating_sub(1) * page_size;
    let items = records
        .iter()
        .skip(start)
        .take(page_size)
        .map(|r| r.to_string())
        .collect();

    Page {
        items,
        page,
        page_count,
    }
}
