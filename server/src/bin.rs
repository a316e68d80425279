use std::{net::IpAddr, sync::Arc};

use hyper::{
    service::{make_service_fn, service_fn},
    Server,
};
use server::{app::App, AppSettings, Webserver};
use structopt::StructOpt;

#[macro_use]
extern crate log;

#[tokio::main]
async fn main() {
    let env = std::env::var("TODO_SERVER_ENV").unwrap_or_else(|_| "test".to_string());

    let env_file_name = format!("{}.env", env);

    let env_file_result = dotenv::from_filename(&env_file_name);

    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    if let Err(e) = env_file_result {
        warn!(
            "environment file not found: {}, error: {}",
            env_file_name, e
        );
    }

    let settings = AppSettings::from(Opts::from_args());

    let app = Arc::new(App::in_memory());

    let webserver = Arc::new(Webserver::new(app));

    let addr = (settings.host, settings.port).into();

    let service = make_service_fn(|_| {
        let webserver = webserver.clone();
        async {
            Ok::<_, hyper::Error>(service_fn(move |request| {
                let webserver = webserver.clone();
                server::entry_point(webserver, request)
            }))
        }
    });

    let http_server = match Server::try_bind(&addr) {
        Ok(builder) => builder.serve(service),
        Err(e) => {
            error!("failed to bind to {:?}: {}", addr, e);
            return;
        }
    };

    info!("starting server on {:?}", addr);
    let graceful = http_server.with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for shutdown signal: {}", e);
        }
        info!("shutting down");
    });

    if let Err(e) = graceful.await {
        error!("server error: {}", e);
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Opts {
    #[structopt(long, default_value = "0.0.0.0", env = "TODO_SERVER_LISTEN_HOST")]
    host: IpAddr,
    #[structopt(long, default_value = "3000", env = "TODO_SERVER_LISTEN_PORT")]
    port: u16,
}

impl From<Opts> for AppSettings {
    fn from(Opts { host, port }: Opts) -> Self {
        AppSettings { host, port }
    }
}
