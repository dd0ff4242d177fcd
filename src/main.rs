#[macro_use]
extern crate rocket;

mod catchers;
mod cli;
mod config;
mod error;
mod fairings;
mod qr;
mod routes;
mod telemetry;
mod types;

#[cfg(test)]
mod test_helpers;

use clap::Parser;
use config::AppConfig;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedMethods, AllowedOrigins, CorsOptions};
use std::collections::HashSet;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::index::get_index,
        routes::generate::post_generate,
        routes::health::get_health,
    ),
    components(),
    tags(
        (name = "Page", description = "Landing page"),
        (name = "QR Code", description = "QR code generation"),
        (name = "Health", description = "Health check endpoints"),
    ),
    info(
        title = "QR Code Generator",
        version = "0.1.0",
        description = "Turns text into QR code PNG images",
    )
)]
struct ApiDoc;

fn configure_cors() -> CorsOptions {
    let allowed_methods: AllowedMethods = [Method::Get, Method::Post, Method::Options]
        .into_iter()
        .map(rocket_cors::Method::from)
        .collect();

    CorsOptions {
        allowed_origins: AllowedOrigins::all(),
        allowed_methods,
        allowed_headers: AllowedHeaders::all(),
        allow_credentials: false,
        expose_headers: HashSet::from(["X-Request-Id".to_string()]),
        ..Default::default()
    }
}

fn rocket(config: AppConfig) -> rocket::Rocket<rocket::Build> {
    let rocket = rocket::custom(config.rocket_config())
        .manage(config.qr)
        .mount("/", routes::index::routes())
        .mount("/", routes::generate::routes())
        .mount("/", routes::health::routes())
        .mount(
            "/",
            SwaggerUi::new("/swagger/<tail..>").url("/api-doc/openapi.json", ApiDoc::openapi()),
        )
        .register("/", catchers::catchers())
        .attach(fairings::RequestLogger);

    match configure_cors().to_cors() {
        Ok(cors) => rocket.attach(cors),
        Err(e) => {
            tracing::error!(error = %e, "invalid CORS configuration, continuing without CORS");
            rocket
        }
    }
}

#[rocket::main]
async fn main() {
    telemetry::init();

    let cli = cli::Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(cli::Command::Render { text, output }) => {
            if let Err(e) = cli::handle_render_command(&text, &output, &config.qr) {
                tracing::error!(error = %e, "render failed");
                std::process::exit(1);
            }
        }
        Some(cli::Command::Serve { port, address }) => {
            serve(config.with_overrides(address, port)).await
        }
        None => serve(config).await,
    }
}

async fn serve(config: AppConfig) {
    tracing::info!(address = %config.address, port = config.port, "starting server");
    if let Err(e) = rocket(config).launch().await {
        tracing::error!(error = %e, "server terminated with error");
        std::process::exit(1);
    }
}
