use std::sync::Arc;

use actix_web::web;
use colored::Colorize;
use domain_rental::exception::RentalException;
use tracing::{error, info};

use crate::api::{self, ApiError};
use crate::infrastructure::{
    config::build_config,
    middleware::{authorization::AddUserInfo, timeout::RequestTimeout},
    telemetry::initialize_telemetry,
    ServiceProvider,
};

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build runtime".red(), e);
        }
    };
    runtime.block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };
    if let Err(e) = initialize_telemetry(config.telemetry()) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    };
    let service_provider = match ServiceProvider::build(config).await {
        Ok(x) => Arc::new(x),
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build Service Provider".red(), e);
        }
    };
    tokio::select! {
        _ = initialize_web_host(service_provider) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Stopping Services (ctrl-c handling).");
        }
    }
}

pub async fn initialize_web_host(sp: Arc<ServiceProvider>) {
    let host = sp.config().host().clone();
    let jwt = sp.config().jwt().clone();
    let timeout_ms = host.request_timeout_ms();
    let server = actix_web::HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allow_any_method()
            .max_age(86400);

        actix_web::App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::from(sp.clone()))
            .service(
                web::scope("")
                    .wrap(RequestTimeout::new(timeout_ms))
                    .wrap(AddUserInfo::new(jwt.clone()))
                    .configure(routes),
            )
    })
    .bind((host.bind_address().to_owned(), host.bind_port()));
    let server = match server {
        Ok(x) => x,
        Err(e) => return error!("Cannot bind web server: {}", e),
    };
    match server.disable_signals().run().await {
        Ok(_) => info!("Web server stopped successfully."),
        Err(e) => error!("Web server into error: {}", e),
    }
}

fn payload_error(reason: String) -> actix_web::Error {
    ApiError::from(RentalException::InvalidPayload { reason }).into()
}

/// Registers every handler. Callers wrap the scope with [`AddUserInfo`].
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|e, _| payload_error(e.to_string())))
        .app_data(web::QueryConfig::default().error_handler(|e, _| payload_error(e.to_string())))
        .app_data(web::PathConfig::default().error_handler(|e, _| payload_error(e.to_string())))
        .service(api::request::create_request)
        .service(api::request::get_requests)
        .service(api::request::transition_request)
        .service(api::request::get_visitable_requests)
        .service(api::request::mark_request_read)
        .service(api::request::get_unread_request_count)
        .service(api::complaint::create_complaint)
        .service(api::complaint::get_complaints)
        .service(api::complaint::set_complaint_status)
        .service(api::complaint::hide_complaint)
        .service(api::notification::get_notifications)
        .service(api::notification::mark_notification_read)
        .service(api::notification::mark_all_notifications_read)
        .service(api::notification::get_unread_notification_count)
        .service(api::notification::delete_notification)
        .service(api::room::leave_room)
        .service(api::room::get_occupied_rooms);
}
