//! Percent-encoding for resource identifiers placed in URL paths.
//!
//! Devbox ids, secret names, and object ids are interpolated into paths;
//! encoding keeps a stray `/` or `?` from changing the request target.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
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
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
///
/// ```
/// use runloop_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("dbx_123"), "dbx_123");
/// assert_eq!(encode_path_segment("my secret"), "my%20secret");
/// assert_eq!(encode_path_segment("a/b"), "a%2Fb");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
