//! Paginate stage: fixed-size slicing with silent clamping.
//!
//! Total functions; an out-of-range page clamps to the nearest valid
//! page and an empty collection yields an empty page, never a panic.

use crate::model::Submission;

/// One visible page plus the page count it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Records on the (clamped) requested page, in sorted order.
    pub items: Vec<Submission>,
    /// Total page count; at least 1 even for an empty collection.
    pub total_pages: usize,
}

/// Summary line data: "Showing `range_start`–`range_end` of `visible_count`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// Number of records that survived filtering.
    pub visible_count: usize,
    /// 1-based index of the first visible record; 0 when nothing is visible.
    pub range_start: usize,
    /// 1-based index of the last visible record; 0 when nothing is visible.
    pub range_end: usize,
}

/// Total page count for a collection: `ceil(len / page_size)`, minimum 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into the valid range for a collection.
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

/// Slice out the requested page, clamping the page index first.
pub fn paginate(records: &[Submission], page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total = total_pages(records.len(), page_size);
    let page = page.clamp(1, total);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(records.len());
    let items = match records.get(start..end) {
        Some(slice) => slice.to_vec(),
        None => Vec::new(),
    };

    Page {
        items,
        total_pages: total,
    }
}

/// Compute the visible range for the summary line.
///
/// Uses the same clamping as [`paginate`], so the two always agree.
pub fn summary(visible_count: usize, page: usize, page_size: usize) -> PageSummary {
    let page_size = page_size.max(1);
    let page = clamp_page(page, visible_count, page_size);

    if visible_count == 0 {
        return PageSummary {
            visible_count: 0,
            range_start: 0,
            range_end: 0,
        };
    }

    PageSummary {
        visible_count,
        range_start: (page - 1) * page_size + 1,
        range_end: (page * page_size).min(visible_count),
    }
}

// ===== Tests =====
