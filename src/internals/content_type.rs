use ::http::HeaderMap;
use ::http::HeaderValue;
use ::http::header::CONTENT_TYPE;

use crate::Payload;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Adds a `Content-Type` matching the payload,
/// unless the headers already have one.
pub fn ensure_content_type_header(payload: &Payload, headers: &mut HeaderMap) {
    if headers.contains_key(CONTENT_TYPE) {
        return;
    }

    let content_type = match payload {
        Payload::Json(_) => JSON_CONTENT_TYPE,
        Payload::Text(_) => TEXT_CONTENT_TYPE,
    };

    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
}
