//! HTTP span naming.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

/// Collapse identifiers and reset tokens so routes stay low-cardinality.
fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else if segment.matches('.').count() == 2 {
                "{token}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_templated() {
        let name = request_span_name("PUT", "/carts/0190a8c4-7b6e-7c2a-9e1f-2b3c4d5e6f70/products/");

        assert_eq!(name.route, "/carts/{id}/products");
        assert_eq!(name.span_name, "PUT /carts/{id}/products");
    }

    #[test]
    fn reset_tokens_are_templated() {
        let name = request_span_name("POST", "/sessions/resetpassword/aaa.bbb.ccc");

        assert_eq!(name.route, "/sessions/resetpassword/{token}");
    }

    #[test]
    fn root_path_is_kept() {
        assert_eq!(request_span_name("GET", "/").route, "/");
    }
}
