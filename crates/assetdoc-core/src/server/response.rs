//! What the file handler answers with, and its conversion to an axum response.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::mime::TEXT_HTML;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl FileResponse {
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: content_type.to_string(),
            body,
        }
    }

    /// Fixed HTML page naming the path that could not be read.
    pub fn not_found(rel_path: &str) -> Self {
        let body = format!(
            "<html>\n\
             <head><title>404 - File Not Found</title></head>\n\
             <body>\n\
             <h1>404 - File Not Found</h1>\n\
             <p>The file <code>{}</code> was not found.</p>\n\
             <p><a href=\"/\">Go to main page</a></p>\n\
             </body>\n\
             </html>\n",
            escape_html(rel_path)
        );
        Self {
            status: StatusCode::NOT_FOUND,
            content_type: TEXT_HTML.to_string(),
            body: body.into_bytes(),
        }
    }
}

impl IntoResponse for FileResponse {
    fn into_response(self) -> Response {
        // Configured MIME strings may not be valid header values.
        let content_type = HeaderValue::from_str(&self.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
        // Explicit so HEAD answers carry the GET length.
        let length = HeaderValue::from(self.body.len());
        (
            self.status,
            [(header::CONTENT_TYPE, content_type), (header::CONTENT_LENGTH, length)],
            self.body,
        )
            .into_response()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
