//! HTTP server setup.

use std::{sync::Arc, time::Duration};

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::{api, middleware::auth::Authentication, model::AppState};

/// Creates and binds the main HTTP server.
///
/// Serves the liveness probe at the root and the config API under
/// `context_path`. Workers default to the number of physical cores.
pub fn main_server(
    app_state: Arc<AppState>,
    context_path: String,
    address: String,
    port: u16,
    workers: Option<usize>,
    shutdown_timeout: Duration,
) -> Result<Server, std::io::Error> {
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Authentication)
            .app_data(web::Data::from(app_state.clone()))
            .configure(|cfg| api::configure(cfg, &context_path))
    })
    .shutdown_timeout(shutdown_timeout.as_secs());

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    Ok(server.bind((address, port))?.run())
}
