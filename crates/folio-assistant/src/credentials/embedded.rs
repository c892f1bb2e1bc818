use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;

/// Decode each fragment on its own and join them in order.
///
/// Returns `None` if any fragment fails to decode or the result is empty.
pub fn decode_fragments<I>(fragments: I) -> Option<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut joined = String::new();
    for fragment in fragments {
        let bytes = B64.decode(fragment.as_ref().trim()).ok()?;
        joined.push_str(std::str::from_utf8(&bytes).ok()?);
    }
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}
