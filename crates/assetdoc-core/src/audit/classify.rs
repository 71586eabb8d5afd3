//! Classify a fetch outcome into an audit result.

use crate::fetch::{FetchError, FetchedResponse};
use crate::manifest::AssetDescriptor;

use super::result::{AuditDetail, AuditError, AuditResult};

const DOCTYPE_MARKER: &str = "<!DOCTYPE html>";
const NAVIGATION_MARKER: &str = "window.location";
const PREVIEW_CHARS: usize = 200;

/// True when `text` looks like a captured redirect page rather than the real asset.
///
/// This is a substring heuristic, not a content-type check: a genuine HTML page that
/// contains both markers is flagged too.
pub fn is_redirect_stub(text: &str) -> bool {
    text.contains(DOCTYPE_MARKER) && text.contains(NAVIGATION_MARKER)
}

/// Classify one fetch. Order: transport/status error, redirect stub, blank body, ok.
pub fn classify(
    asset: &AssetDescriptor,
    outcome: Result<FetchedResponse, FetchError>,
) -> AuditResult {
    let detail = match outcome {
        Err(e) => AuditDetail::Error(AuditError::Network(e.to_string())),
        Ok(resp) if !resp.is_success() => AuditDetail::Error(AuditError::Http(resp.status)),
        Ok(resp) => classify_body(resp),
    };
    AuditResult {
        url: asset.url.clone(),
        category: asset.category,
        detail,
    }
}

fn classify_body(resp: FetchedResponse) -> AuditDetail {
    let text = resp.text();
    if is_redirect_stub(&text) {
        return AuditDetail::Redirect {
            preview: text.chars().take(PREVIEW_CHARS).collect(),
        };
    }
    if text.trim().is_empty() {
        return AuditDetail::Empty;
    }
    AuditDetail::Ok {
        content_length: resp.body.len(),
        content_type: resp.content_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::result::{AuditStatus, IssueKind};
    use crate::manifest::AssetCategory;

    fn ok(body: &[u8]) -> Result<FetchedResponse, FetchError> {
        Ok(FetchedResponse {
            status: 200,
            content_type: Some("text/css".into()),
            body: body.to_vec(),
        })
    }

    fn css() -> AssetDescriptor {
        AssetDescriptor::new("css2(1)", AssetCategory::Css)
    }

    #[test]
    fn redirect_stub_detected() {
        let r = classify(
            &css(),
            ok(b"<!DOCTYPE html><script>window.location='x'</script>"),
        );
        assert_eq!(r.status(), AuditStatus::Redirect);
        assert_eq!(r.issue(), Some(IssueKind::RedirectHtml));
        match r.detail {
            AuditDetail::Redirect { preview } => assert!(preview.starts_with("<!DOCTYPE html>")),
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn one_marker_is_not_a_redirect() {
        let r = classify(&css(), ok(b"<!DOCTYPE html><p>hello</p>"));
        assert_eq!(r.status(), AuditStatus::Ok);
        let r = classify(&css(), ok(b"if (x) window.location = y;"));
        assert_eq!(r.status(), AuditStatus::Ok);
    }

    #[test]
    fn redirect_preview_is_truncated() {
        let mut body = b"<!DOCTYPE html><script>window.location='x'</script>".to_vec();
        body.extend(std::iter::repeat(b'a').take(1000));
        let r = classify(&css(), ok(&body));
        match r.detail {
            AuditDetail::Redirect { preview } => assert_eq!(preview.chars().count(), 200),
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_body_is_empty_not_ok() {
        for body in [&b""[..], b"   ", b"\n\t \r\n"] {
            let r = classify(&css(), ok(body));
            assert_eq!(r.status(), AuditStatus::Empty);
        }
    }

    #[test]
    fn binary_body_is_ok_with_length() {
        let body: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
        let asset = AssetDescriptor::new("icon-192.png", AssetCategory::Image);
        let r = classify(
            &asset,
            Ok(FetchedResponse {
                status: 200,
                content_type: Some("image/png".into()),
                body,
            }),
        );
        assert_eq!(
            r.detail,
            AuditDetail::Ok {
                content_length: 4096,
                content_type: Some("image/png".into()),
            }
        );
    }

    #[test]
    fn non_2xx_is_error_even_with_redirect_body() {
        let r = classify(
            &css(),
            Ok(FetchedResponse {
                status: 404,
                content_type: Some("text/html".into()),
                body: b"<!DOCTYPE html><script>window.location='/'</script>".to_vec(),
            }),
        );
        assert_eq!(r.detail, AuditDetail::Error(AuditError::Http(404)));
    }

    #[test]
    fn fetch_failure_is_network_error() {
        let r = classify(&css(), Err(FetchError::Task("worker gone".into())));
        assert_eq!(r.status(), AuditStatus::Error);
        assert_eq!(r.issue(), Some(IssueKind::ConnectionError));
    }
}
