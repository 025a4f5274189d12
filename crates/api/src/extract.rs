//! Request extractors whose rejections render through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor. A body that is not valid JSON or does not match the
/// target type is a 400 `VALIDATION_ERROR` instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    async fn echo(AppJson(input): AppJson<Named>) -> String {
        input.name
    }

    async fn call(content_type: &str, body: &'static str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/", post(echo));
        let request = Request::post("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let (status, body) = call("application/json", r#"{"name":"ada"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ada");
    }

    #[tokio::test]
    async fn test_rejections_render_as_json_400() {
        let cases = [
            ("application/json", r#"{}"#),
            ("application/json", r#"{"name":1}"#),
            ("application/json", r#"{"name":"#),
            ("text/plain", r#"{"name":"ada"}"#),
        ];
        for (content_type, body) in cases {
            let (status, bytes) = call(content_type, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");

            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["code"], "VALIDATION_ERROR");
            assert!(json["error"].is_string());
        }
    }
}
