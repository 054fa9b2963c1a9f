use anyhow::Result;
use log::info;
use podgrid::app::{self, App};
use podgrid::catalog_api::{API_BASE_URL, CatalogApi, HttpCatalogApi};
use podgrid::event::AppEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The terminal owns stdout, so logs go to a file next to the binary.
fn init_logging() -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(fern::log_file("podgrid.log")?)
        .apply()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("starting podgrid against {}", API_BASE_URL);

    let api: Arc<dyn CatalogApi> = Arc::new(HttpCatalogApi::new(API_BASE_URL));
    let (tx, rx) = mpsc::unbounded_channel::<AppEvent>();

    // Create new app instance and fire the one-shot catalog fetch
    let mut app = App::new(api, tx);
    app.start_catalog_load();

    // Start the UI with our initialized app
    app::start_ui(app, rx).await
}
