use std::env;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use seaview_api::db::store::create_store;
use seaview_api::routes;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let store = create_store();

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(store.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/bookings")
                            // Public estimate for the booking form
                            .route("/estimate", web::post().to(routes::pricing::estimate))
                            .route("", web::post().to(routes::bookings::create_booking))
                            .route("", web::get().to(routes::bookings::get_all_bookings))
                            .route("/{id}", web::get().to(routes::bookings::get_booking_by_id))
                            .route(
                                "/{id}/confirm",
                                web::put().to(routes::bookings::confirm_booking),
                            )
                            .route(
                                "/{id}/cancel",
                                web::put().to(routes::bookings::cancel_booking),
                            ),
                    )
                    .service(
                        web::scope("/rates")
                            .route("", web::get().to(routes::pricing::get_rates))
                            .route("", web::put().to(routes::pricing::update_rates)),
                    )
                    .service(
                        web::scope("/availability")
                            .route("", web::get().to(routes::availability::get_availability))
                            .route("", web::put().to(routes::availability::set_availability)),
                    )
                    .route(
                        "/calendar/sync",
                        web::post().to(routes::availability::sync_calendar),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
