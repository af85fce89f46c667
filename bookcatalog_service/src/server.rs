use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer};
use paperclip::actix::{web, OpenApiExt};
use tracing_actix_web::TracingLogger;

use crate::app_config::config_app;
use crate::books_repository::BookRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn listener(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
    }
}

/// Registers the routes on an already bound listener and returns the server future
pub fn build_server(
    listener: TcpListener,
    config: &ServerConfig,
    books_repository: Arc<dyn BookRepository>,
) -> std::io::Result<Server> {
    let enable_cors = config.enable_cors;
    let server = HttpServer::new(move || {
        let cors = if enable_cors {
            Cors::permissive()
        } else {
            Cors::default()
        };
        App::new()
            .wrap_api()
            .app_data(web::Data::new(books_repository.clone()))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(config_app)
            .with_json_spec_at("/apispec/v2")
            .build()
    })
    .listen(listener)?
    .run();
    Ok(server)
}
