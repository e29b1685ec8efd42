//! Percent-encoding for job identifiers placed in URL paths.
//!
//! Search ids are opaque server strings. Scheduled and real-time jobs carry
//! characters such as `_`, `.`, `:` and `@` that are safe, but ids supplied by
//! a caller are not trusted: a `/` or `?` in one must not change the path.
//!
//! ```
//! use splunk_search_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("rt_md_1700000000.42"), "rt_md_1700000000.42");
//! assert_eq!(encode_path_segment("../jobs"), "..%2Fjobs");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters escaped inside a single path segment (RFC 3986 section 3.3,
/// plus the delimiters Splunk treats specially).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
