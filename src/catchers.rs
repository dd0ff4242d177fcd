use crate::error::ApiErrorResponse;
use crate::fairings::request_span_for;
use rocket::serde::json::Json;
use rocket::Catcher;
use rocket::Request;

#[catch(400)]
pub fn bad_request(req: &Request<'_>) -> Json<ApiErrorResponse> {
    let span = request_span_for(req);
    span.in_scope(|| tracing::warn!("bad request (malformed headers or input)"));

    Json(ApiErrorResponse::new("The request was invalid or malformed"))
}

#[catch(404)]
pub fn not_found(req: &Request<'_>) -> Json<ApiErrorResponse> {
    let span = request_span_for(req);
    span.in_scope(|| tracing::warn!("route not found"));

    Json(ApiErrorResponse::new("The requested resource was not found"))
}

#[catch(500)]
pub fn internal_server_error(req: &Request<'_>) -> Json<ApiErrorResponse> {
    let span = request_span_for(req);
    span.in_scope(|| tracing::error!("unhandled internal server error"));

    Json(ApiErrorResponse::new("Internal server error"))
}

pub fn catchers() -> Vec<Catcher> {
    rocket::catchers![bad_request, not_found, internal_server_error]
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::client;
    use rocket::http::Status;

    #[rocket::async_test]
    async fn test_unknown_route_returns_json_404() {
        let client = client().await;
        let response = client.get("/does-not-exist").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);

        let body = response.into_string().await.expect("response body");
        let json: serde_json::Value = serde_json::from_str(&body).expect("valid json");
        assert_eq!(json["error"], "The requested resource was not found");
    }

    #[rocket::async_test]
    async fn test_wrong_method_on_generate_returns_404() {
        let client = client().await;
        let response = client.get("/generate").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }
}
