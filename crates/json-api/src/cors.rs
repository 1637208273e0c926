//! Cross-origin policy

use salvo::{
    cors::{AllowOrigin, Cors, CorsHandler},
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue},
    },
};
use tracing::warn;

/// Allow browser calls from `origins` only. Unparseable origins are skipped.
pub(crate) fn cors_handler(origins: &[String]) -> CorsHandler {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(source) => {
                warn!(origin, "ignoring invalid CORS origin: {source}");

                None
            }
        })
        .collect();

    Cors::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![AUTHORIZATION, CONTENT_TYPE])
        .into_handler()
}
