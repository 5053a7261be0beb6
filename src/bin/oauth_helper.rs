use actix_web::{web, App, HttpServer};
use clap::Parser;
use folio::bootstrap;
use folio::config::HelperConfig;
use folio::oauth_helper::{configure, StaticRoot};

async fn async_main(HelperConfig { port, root }: HelperConfig) {
    tracing::info!("serving {} on port {}", root.display(), port);

    let root = web::Data::new(StaticRoot(root));

    let server = match HttpServer::new(move || App::new().app_data(root.clone()).configure(configure))
        .bind(("0.0.0.0", port))
    {
        Ok(s) => s,
        Err(e) => return tracing::error!("cannot bind port {}: {}", port, e),
    };

    if let Err(e) = server.run().await {
        tracing::error!("server stopped: {}", e);
    }
}

fn main() {
    bootstrap::init_tracing();
    let config = HelperConfig::parse();

    let rt = match bootstrap::runtime("oauth-helper") {
        Ok(r) => r,
        Err(e) => return eprintln!("{}", e),
    };

    rt.block_on(async_main(config))
}
