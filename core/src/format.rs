//! Plain-text rendering of a completed HTTP response.
//!
//! Layout, in this order: a `STATUS:` line, a `HEADERS:` block with one
//! `name: value` line per header, then a `BODY:` block with the raw text.
//! The `BODY:` block is left out entirely when the body could not be read.

use std::fmt::Write;

use crate::http::{HttpResponse, ResponseBody};

/// Result of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Status, headers and body were all available.
    WithBody(String),
    /// The body could not be read; the text stops after the header block.
    WithoutBody(String),
    /// No response arrived. Carries the transport's error message.
    Failed(String),
}

impl Outcome {
    /// Text for the result slot, if the request produced a response.
    pub fn rendered(&self) -> Option<&str> {
        match self {
            Outcome::WithBody(text) | Outcome::WithoutBody(text) => Some(text.as_str()),
            Outcome::Failed(_) => None,
        }
    }
}

/// Render `response` into the three-section text block.
pub fn render(response: &HttpResponse) -> String {
    let mut text = format!("STATUS: {}\n\nHEADERS:\n", response.status);
    for (name, value) in &response.headers {
        // Writing into a String cannot fail.
        let _ = writeln!(text, "{name}: {value}");
    }
    if let ResponseBody::Text(body) = &response.body {
        text.push_str("\nBODY:\n");
        text.push_str(body);
    }
    text
}

/// Render `response` and classify it by whether the body was readable.
pub fn outcome(response: &HttpResponse) -> Outcome {
    let text = render(response);
    match response.body {
        ResponseBody::Text(_) => Outcome::WithBody(text),
        ResponseBody::Unreadable { .. } => Outcome::WithoutBody(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: ResponseBody) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        }
    }

    #[test]
    fn renders_get_of_text_file() {
        let resp = response(
            200,
            &[("Content-Type", "text/plain")],
            ResponseBody::Text("hello".to_string()),
        );
        assert_eq!(
            render(&resp),
            "STATUS: 200\n\nHEADERS:\nContent-Type: text/plain\n\nBODY:\nhello"
        );
    }

    #[test]
    fn renders_empty_headers_and_body() {
        let resp = response(201, &[], ResponseBody::Text(String::new()));
        assert_eq!(render(&resp), "STATUS: 201\n\nHEADERS:\n\nBODY:\n");
    }

    #[test]
    fn keeps_header_order() {
        let resp = response(
            200,
            &[("x-b", "2"), ("x-a", "1"), ("x-b", "3")],
            ResponseBody::Text(String::new()),
        );
        assert_eq!(
            render(&resp),
            "STATUS: 200\n\nHEADERS:\nx-b: 2\nx-a: 1\nx-b: 3\n\nBODY:\n"
        );
    }

    #[test]
    fn unreadable_body_drops_body_section() {
        let resp = response(
            200,
            &[("content-length", "5")],
            ResponseBody::Unreadable {
                reason: "connection reset".to_string(),
            },
        );
        let out = outcome(&resp);
        assert_eq!(
            out,
            Outcome::WithoutBody("STATUS: 200\n\nHEADERS:\ncontent-length: 5\n".to_string())
        );
        assert!(!out.rendered().unwrap().contains("BODY:"));
    }

    #[test]
    fn error_statuses_render_like_any_other() {
        let resp = response(404, &[], ResponseBody::Text("not found".to_string()));
        let out = outcome(&resp);
        assert_eq!(out, Outcome::WithBody("STATUS: 404\n\nHEADERS:\n\nBODY:\nnot found".to_string()));
    }

    #[test]
    fn empty_body_is_not_the_same_as_unreadable() {
        let empty = outcome(&response(204, &[], ResponseBody::Text(String::new())));
        let unreadable = outcome(&response(
            204,
            &[],
            ResponseBody::Unreadable {
                reason: "gone".to_string(),
            },
        ));
        assert!(matches!(empty, Outcome::WithBody(_)));
        assert!(matches!(unreadable, Outcome::WithoutBody(_)));
        assert_ne!(empty.rendered(), unreadable.rendered());
    }

    #[test]
    fn failed_outcome_has_no_rendering() {
        assert_eq!(Outcome::Failed("refused".to_string()).rendered(), None);
    }

    #[test]
    fn render_is_deterministic() {
        let resp = response(500, &[("server", "x")], ResponseBody::Text("boom".to_string()));
        assert_eq!(render(&resp), render(&resp.clone()));
    }
}
