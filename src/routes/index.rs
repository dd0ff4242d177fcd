use rocket::response::content::RawHtml;
use rocket::Route;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[utoipa::path(
    get,
    path = "/",
    tag = "Page",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html", body = String),
    )
)]
#[get("/")]
pub async fn get_index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

pub fn routes() -> Vec<Route> {
    rocket::routes![get_index]
}
