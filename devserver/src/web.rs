use actix_cors::Cors;
use actix_web::{
    get,
    http::header,
    middleware,
    web::Data,
    App, HttpResponse, HttpServer, Responder,
};

use crate::{config::Config, proxy::{self, Upstream}};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("homesec devserver: API under /api")
}

pub async fn new_http_server(config: &Config, upstream: Upstream) -> std::io::Result<()> {
    let upstream = Data::new(upstream);
    let frontend_origin = config.frontend_origin.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(upstream.clone())
            .service(hello)
            .configure(proxy::config)
            .wrap(
                Cors::default()
                    .allowed_origin(&frontend_origin)
                    .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
                    .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
                    .allowed_header(header::CONTENT_TYPE)
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
