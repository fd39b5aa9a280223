//! Tag extraction for server responses
//!
//! The server answers with loosely formed XML. Values are pulled out by
//! locating the first `<tag>` and the first `</tag>` in the body and taking
//! the text in between; there is no parsing, no attribute handling and no
//! awareness of nesting, comments or CDATA.
//!
//! When a tag is missing the slice bounds degrade the same way every client
//! of this server has always degraded them:
//! - no opening tag: the slice starts `tag.len() + 1` characters into the body
//! - no closing tag: the slice stops before the last character of the body
//! - start at or past end: the result is empty
//!
//! Callers compare the result against exact markers, so a degraded slice
//! simply fails to match.

/// Returns the text between the first `<tag>` and the first `</tag>` in `body`
///
/// # Example
/// ```
/// use kettle_core::markup::extract_tag;
///
/// let body = "<a/><status_desc>Finished</status_desc><b/>";
/// assert_eq!(extract_tag("status_desc", body), "Finished");
/// ```
pub fn extract_tag<'a>(tag: &str, body: &'a str) -> &'a str {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = match body.find(&open) {
        Some(idx) => idx + open.len(),
        None => nth_char_offset(body, tag.chars().count() + 1),
    };

    let end = match body.find(&close) {
        Some(idx) => idx,
        None => last_char_offset(body),
    };

    if start >= end { "" } else { &body[start..end] }
}

/// Strict variant of [`extract_tag`]: `None` unless both tags are present in order
///
/// Only meant for spotting malformed responses; decisions are made on
/// [`extract_tag`].
pub fn find_tag<'a>(tag: &str, body: &'a str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = body.find(&open)? + open.len();
    let end = body.find(&close)?;

    body.get(start..end)
}

fn nth_char_offset(body: &str, n: usize) -> usize {
    body.char_indices().nth(n).map_or(body.len(), |(idx, _)| idx)
}

fn last_char_offset(body: &str) -> usize {
    body.char_indices().next_back().map_or(0, |(idx, _)| idx)
}
