//! HTTP span naming.

/// Collections whose next path segment is a product id.
const PRODUCT_COLLECTIONS: [&str; 3] = ["products", "items", "wishlist"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Replace product ids with `{product}` so metrics and spans stay low-cardinality.
fn route_template(path: &str) -> String {
    let mut template = String::from("/");
    let mut previous: Option<&str> = None;

    for (index, segment) in path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .enumerate()
    {
        if index > 0 {
            template.push('/');
        }

        if previous.is_some_and(|collection| PRODUCT_COLLECTIONS.contains(&collection)) {
            template.push_str("{product}");
        } else {
            template.push_str(segment);
        }

        previous = Some(segment);
    }

    template
}
