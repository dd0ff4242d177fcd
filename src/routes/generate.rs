use crate::error::{ApiError, ApiErrorResponse};
use crate::fairings::TracingSpan;
use crate::qr::{self, QrSettings};
use crate::types::generate::GenerateRequest;
use rocket::http::ContentType;
use rocket::serde::json::{self, Json};
use rocket::{Route, State};
use std::fmt::Display;
use tracing::Instrument;

const NO_TEXT_PROVIDED: &str = "No text provided";

/// Every failure past validation is reported the same way: 500 with the
/// underlying error's message.
fn generation_failed(e: impl Display) -> ApiError {
    ApiError::Internal(e.to_string())
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "QR Code",
    request_body = GenerateRequest,
    responses(
        (
            status = 200,
            description = "PNG image of the QR code",
            content_type = "image/png",
            body = Vec<u8>
        ),
        (status = 400, description = "Text missing or empty", body = ApiErrorResponse),
        (status = 500, description = "Body unreadable or encoding failed", body = ApiErrorResponse),
    )
)]
#[post("/generate", data = "<request>")]
pub async fn post_generate(
    span: TracingSpan,
    settings: &State<QrSettings>,
    request: Result<Json<GenerateRequest>, json::Error<'_>>,
) -> Result<(ContentType, Vec<u8>), ApiError> {
    let settings = *settings.inner();
    async move {
        let request = match request {
            Ok(Json(request)) => request,
            Err(e) => return Err(generation_failed(e)),
        };

        let Some(text) = request.text() else {
            return Err(ApiError::BadRequest(NO_TEXT_PROVIDED.into()));
        };
        tracing::info!(text_len = text.len(), "request received");

        let png = qr::render_png_blocking(text.to_owned(), settings)
            .await
            .map_err(generation_failed)?;

        tracing::info!(png_bytes = png.len(), "qr code generated");
        Ok((ContentType::PNG, png))
    }
    .instrument(span.0)
    .await
}

pub fn routes() -> Vec<Route> {
    rocket::routes![post_generate]
}
