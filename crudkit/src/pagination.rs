//! Next/previous page URL construction
//!
//! Pure functions of (base URL, offset, limit, total count, ordering); no
//! state, no side effects. Used by the list route to fill the
//! `next`/`previous` fields of the response envelope.
//!
//! # Example
//!
//! ```rust
//! use crudkit::pagination::{next_page_url, previous_page_url};
//!
//! let next = next_page_url("/users/", 0, 10, 25, None);
//! assert_eq!(next.as_deref(), Some("/users/?offset=10&limit=10"));
//!
//! let prev = previous_page_url("/users/", 0, 10, None);
//! assert_eq!(prev, None);
//! ```

/// URL for the next page, if one exists
///
/// Present iff `offset + limit < count`. Encodes the advanced offset, the
/// unchanged limit, and the order-by expression when given.
pub fn next_page_url(
    base_url: &str,
    offset: u64,
    limit: u64,
    count: i64,
    order_by: Option<&str>,
) -> Option<String> {
    let next_offset = offset.checked_add(limit)?;
    if count < 0 || next_offset >= count as u64 {
        return None;
    }
    Some(page_url(base_url, next_offset, limit, order_by))
}

/// URL for the previous page, if one exists
///
/// Present iff `offset - limit >= 0`.
pub fn previous_page_url(
    base_url: &str,
    offset: u64,
    limit: u64,
    order_by: Option<&str>,
) -> Option<String> {
    let prev_offset = offset.checked_sub(limit)?;
    Some(page_url(base_url, prev_offset, limit, order_by))
}

fn page_url(base_url: &str, offset: u64, limit: u64, order_by: Option<&str>) -> String {
    let mut url = format!("{base_url}?offset={offset}&limit={limit}");
    if let Some(order_by) = order_by.filter(|o| !o.is_empty()) {
        url.push_str("&order_by=");
        url.push_str(&urlencoding::encode(order_by));
    }
    url
}
