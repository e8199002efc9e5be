use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted_headers: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let sensitive = k.eq_ignore_ascii_case("authorization")
                    || k.to_ascii_lowercase().contains("api-key");
                let v = if sensitive { "[REDACTED]".into() } else { v.clone() };
                (k.clone(), v)
            })
            .collect();

        let body_summary = match &self.body {
            Body::Empty => "Empty".to_string(),
            Body::Json(s) => format!("Json(len={})", s.len()),
        };

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &redacted_url(&self.url))
            .field("headers", &redacted_headers)
            .field("body", &body_summary)
            .finish()
    }
}

// The credential travels as a `key` query parameter, so the URL itself is
// sensitive.
fn redacted_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let redacted: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("key", _)) => "key=[REDACTED]".to_string(),
            _ => pair.to_string(),
        })
        .collect();
    format!("{}?{}", base, redacted.join("&"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Empty,
    Json(String),
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            method: "GET".into(),
            url: "https://example.com".into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: Body::Empty,
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn debug_redacts_key_query_parameter() {
        let req = HttpRequest {
            method: "GET".into(),
            url: "https://example.com/v1beta/operations/op-1?alt=json&key=sk-test-123".into(),
            headers: vec![],
            body: Body::Empty,
        };

        let s = format!("{req:?}");
        assert!(!s.contains("sk-test-123"));
        assert!(s.contains("alt=json"));
        assert!(s.contains("key=[REDACTED]"));
    }

    #[test]
    fn debug_redacts_sensitive_headers() {
        let req = HttpRequest {
            method: "POST".into(),
            url: "https://example.com".into(),
            headers: vec![
                ("Authorization".into(), "Bearer sk-test-123".into()),
                ("X-Goog-Api-Key".into(), "g-456".into()),
                ("Content-Type".into(), "application/json".into()),
            ],
            body: Body::Empty,
        };

        let s = format!("{req:?}");
        assert!(!s.contains("sk-test-123"));
        assert!(!s.contains("g-456"));
        assert!(s.contains("[REDACTED]"));
        assert!(s.contains("application/json"));
    }
}
