use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::request::{FromRequest, Outcome};
use rocket::{Data, Request, Response};
use std::time::Instant;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "X-Request-Id";
const MAX_REQUEST_ID_LEN: usize = 128;

struct RequestMeta {
    start: Instant,
    request_id: String,
    span: tracing::Span,
}

/// Opens a tracing span per request and tags the response with its request id.
pub struct RequestLogger;

/// Request guard handing the current request span to a handler.
pub struct TracingSpan(pub tracing::Span);

fn fallback_meta() -> RequestMeta {
    RequestMeta {
        start: Instant::now(),
        request_id: "unknown".to_string(),
        span: tracing::Span::none(),
    }
}

/// Accepts a caller-supplied id when it is short, printable ASCII.
fn sanitize_request_id(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    let acceptable = !trimmed.is_empty()
        && trimmed.len() <= MAX_REQUEST_ID_LEN
        && trimmed.is_ascii()
        && !trimmed.chars().any(|c| c.is_control());
    acceptable.then(|| trimmed.to_string())
}

fn request_id_for(req: &Request<'_>) -> String {
    sanitize_request_id(req.headers().get_one(REQUEST_ID_HEADER))
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub(crate) fn request_span_for(req: &Request<'_>) -> tracing::Span {
    req.local_cache(fallback_meta).span.clone()
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for TracingSpan {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(TracingSpan(request_span_for(req)))
    }
}

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        let request_id = request_id_for(req);
        let span = tracing::info_span!(
            "request",
            method = %req.method(),
            path = %req.uri().path(),
            request_id = %request_id,
        );
        span.in_scope(|| tracing::info!("request started"));
        req.local_cache(|| RequestMeta {
            start: Instant::now(),
            request_id,
            span,
        });
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let meta = req.local_cache(fallback_meta);
        let duration_ms = meta.start.elapsed().as_secs_f64() * 1000.0;
        let status = res.status().code;
        let content_type = res.content_type().map(|ct| ct.to_string());

        meta.span.in_scope(|| match status {
            500..=u16::MAX => tracing::error!(status, duration_ms, "request completed"),
            400..=499 => tracing::warn!(status, duration_ms, "request completed"),
            _ => tracing::info!(status, duration_ms, content_type, "request completed"),
        });

        res.set_header(Header::new(REQUEST_ID_HEADER, meta.request_id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::client;

    #[test]
    fn test_sanitize_accepts_plain_id() {
        assert_eq!(sanitize_request_id(Some("  abc-123 ")), Some("abc-123".into()));
    }

    #[test]
    fn test_sanitize_rejects_bad_ids() {
        assert_eq!(sanitize_request_id(None), None);
        assert_eq!(sanitize_request_id(Some("   ")), None);
        assert_eq!(sanitize_request_id(Some("caf\u{e9}")), None);
        assert_eq!(sanitize_request_id(Some("a\u{7}b")), None);
        assert_eq!(sanitize_request_id(Some(&"x".repeat(129))), None);
    }

    #[rocket::async_test]
    async fn test_response_echoes_supplied_request_id() {
        let client = client().await;
        let response = client
            .get("/health")
            .header(Header::new(REQUEST_ID_HEADER, "trace-42"))
            .dispatch()
            .await;
        assert_eq!(response.headers().get_one(REQUEST_ID_HEADER), Some("trace-42"));
    }

    #[rocket::async_test]
    async fn test_response_gets_generated_request_id() {
        let client = client().await;
        let response = client.get("/health").dispatch().await;
        let id = response
            .headers()
            .get_one(REQUEST_ID_HEADER)
            .expect("request id header");
        assert!(Uuid::parse_str(id).is_ok());
    }
}
