//! Percent-encoding of job ids interpolated into URL paths.
//!
//! Sids are normally `<epoch>.<n>` or `scheduler__user__app__name_at_...`, but
//! nothing stops a server from handing out one with `/`, `?` or `%` in it.
//! Encoding keeps such a sid inside a single path segment.
//!
//! ```
//! use splunkquery_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("1700000000.42"), "1700000000.42");
//! assert_eq!(encode_path_segment("rt/../1"), "rt%2F..%2F1");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a URL path segment.
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
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
