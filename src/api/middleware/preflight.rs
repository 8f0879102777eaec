//! Catch-all OPTIONS acknowledgement.

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Answer any OPTIONS request with `200 {"status":"ok"}`, whatever the path.
///
/// Browser preflights (those naming `Access-Control-Request-Method`) pass
/// through to the CORS layer underneath.
pub async fn options_ok(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS
        || request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
    {
        return next.run(request).await;
    }

    let mut response = Json(json!({ "status": "ok" })).into_response();
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
