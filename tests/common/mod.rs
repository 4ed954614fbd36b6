use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use std::sync::Arc;

use seaview_api::db::store::{create_store, AppStore};
use seaview_api::routes;

pub struct TestApp {
    pub store: Arc<AppStore>,
}

impl TestApp {
    /// Fresh store per test, rates seeded from env/defaults exactly like the
    /// real binary.
    pub fn new() -> Self {
        let store = create_store();
        Self { store }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            // The Cors + Logger wraps change the body type, so the response
            // body has to stay generic here
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(self.store.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/bookings")
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
    }
}
