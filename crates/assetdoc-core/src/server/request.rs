//! Request path to file path mapping.

/// Map a request target to a path relative to the served root.
///
/// Query and fragment are dropped, `/` becomes `index.html`, and leading slashes are
/// stripped. The path is not percent-decoded: captured names like `css2(1)` are used
/// as-is.
pub fn relative_path(target: &str) -> String {
    let path = target.split(['?', '#']).next().unwrap_or("");
    let path = if path.is_empty() || path == "/" {
        "/index.html"
    } else {
        path
    };
    path.trim_start_matches('/').to_string()
}

/// True if `rel` stays under the served root (no `..` segment).
pub fn is_confined(rel: &str) -> bool {
    !rel.split(['/', '\\']).any(|seg| seg == "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_index() {
        assert_eq!(relative_path("/"), "index.html");
        assert_eq!(relative_path("/?v=1"), "index.html");
        assert_eq!(relative_path("/index.html"), "index.html");
    }

    #[test]
    fn query_and_fragment_dropped() {
        assert_eq!(relative_path("/next.svg?x=1#top"), "next.svg");
        assert_eq!(relative_path("/msg.html#frag"), "msg.html");
    }

    #[test]
    fn captured_names_kept_verbatim() {
        assert_eq!(relative_path("/cb=gapi(1).loaded_0"), "cb=gapi(1).loaded_0");
        assert_eq!(relative_path("/css2%281%29"), "css2%281%29");
    }

    #[test]
    fn leading_slashes_stripped() {
        assert_eq!(relative_path("//etc/passwd"), "etc/passwd");
    }

    #[test]
    fn dot_dot_segments_not_confined() {
        assert!(is_confined("img/next.svg"));
        assert!(is_confined("a..b"));
        assert!(!is_confined("../secret"));
        assert!(!is_confined("img/../../secret"));
        assert!(!is_confined("img\\..\\secret"));
    }
}
