//! Header line parsing for fetched responses.

/// Content-Type of the final response in `lines`.
///
/// With redirects followed, libcurl reports the header block of every hop; each block
/// starts with a status line, so only headers after the last `HTTP/` line count.
pub(super) fn content_type(lines: &[String]) -> Option<String> {
    let mut content_type = None;
    for line in lines {
        let line = line.trim();
        if line.starts_with("HTTP/") {
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }
    content_type
}
