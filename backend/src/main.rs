mod catalog;
mod config;
mod error;
mod pipeline;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use crate::catalog::{Catalog, SqliteCatalog};
use crate::config::ServerConfig;
use crate::pipeline::assets::{AssetLoader, Letterhead};
use crate::pipeline::chrome::ChromeEngine;
use crate::pipeline::render::PdfRenderer;
use crate::pipeline::TermGenerator;
use crate::state::AppState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();
    let url = config.bind_url();

    let catalog = SqliteCatalog::new(&config.database);
    catalog.ensure_schema().map_err(std::io::Error::other)?;
    info!("Catalog at {}", catalog.path().display());

    // Letterhead images are read once; a missing one stops startup.
    let assets = AssetLoader::new(&config.assets_dir);
    let letterhead = Letterhead::load(&assets, &config.header_image, &config.footer_image)
        .map_err(std::io::Error::other)?;
    for warning in letterhead.band_warnings(&config.pagination) {
        warn!("{}", warning);
    }

    let catalog: Arc<dyn Catalog> = Arc::new(catalog);
    let generator = TermGenerator::new(
        catalog.clone(),
        AssetLoader::new(&config.templates_dir),
        Arc::new(letterhead),
        PdfRenderer::new(Arc::new(ChromeEngine::new(config.chrome_path.clone()))),
        config.pagination.clone(),
    );
    info!(
        "Using {} pagination, attachments up to {} bytes",
        generator.strategy().name(),
        config.max_attachment_bytes
    );
    let state = web::Data::new(AppState::new(
        generator,
        catalog,
        config.max_attachment_bytes,
    ));

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(services::documents::configure_routes())
            .service(services::condominiums::configure_routes())
            .service(services::terms::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
