//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use company_api::Trace;
#[cfg(debug_assertions)]
use company_api::doc::ApiDoc;
use company_api::inbound::http::auth::{current_user, login, register};
use company_api::inbound::http::error::{json_config, path_config};
use company_api::inbound::http::companies::{
    create_company, delete_company, get_company, get_company_by_isin, list_companies,
    update_company,
};
use company_api::inbound::http::health::{HealthState, live, ready};
use company_api::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // `isin/{isin}` is registered before `{id}` so it is matched first.
    let api = web::scope("/api")
        .service(list_companies)
        .service(get_company_by_isin)
        .service(get_company)
        .service(create_company)
        .service(update_company)
        .service(delete_company)
        .service(register)
        .service(login)
        .service(current_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the signing settings are unusable or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)
        .map_err(|err| std::io::Error::other(format!("invalid token settings: {err}")))?;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr())?
        .run();

    health_state.mark_ready();
    Ok(server)
}
