use actix_web::{web, App, HttpServer};
use clap::Parser;
use folio::config::Config;
use folio::controllers::configure;
use folio::middleware::NormalizeErrors;
use folio::{bootstrap, from_config};

async fn async_main(config: Config) {
    let state = match from_config(&config).await {
        Ok(s) => web::Data::new(s),
        Err(e) => return tracing::error!("cannot build application state: {:?}", e),
    };

    let mode = config.mode;
    let addr = ("0.0.0.0", config.port);

    let server = match HttpServer::new(move || {
        App::new()
            .wrap(NormalizeErrors { mode })
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(addr)
    {
        Ok(s) => s,
        Err(e) => return tracing::error!("cannot bind {}:{}: {}", addr.0, addr.1, e),
    };

    tracing::info!("listening on {}:{} ({:?} mode)", addr.0, addr.1, mode);

    if let Err(e) = server.run().await {
        tracing::error!("server stopped: {}", e);
    }
}

fn main() {
    bootstrap::init_tracing();
    let config = Config::parse();

    let rt = match bootstrap::runtime("folio") {
        Ok(r) => r,
        Err(e) => return eprintln!("{}", e),
    };

    rt.block_on(async_main(config))
}
