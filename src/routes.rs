use std::any::Any;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::app::AppState;
use crate::database::Entity;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::{require_admin, require_login};
use crate::types::ReportView;

/// The complete route table
pub fn router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();
    let cors = cors_layer(&state.cors_origins);

    let mut app = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route("/health", get(public::system::health))
        .merge(auth_routes());

    for entity in Entity::ALL {
        app = app.merge(entity_routes(entity, &state));
    }

    app.merge(search_routes(&state))
        .merge(report_routes(&state))
        .merge(social_routes(&state))
        .merge(export_routes(&state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/login", post(auth::login_post))
        .route("/api/logout", post(auth::logout_post))
}

/// List/get for any session, writes for admins. The entity rides along as an extension.
fn entity_routes(entity: Entity, state: &AppState) -> Router<AppState> {
    use protected::records;

    let collection = entity.collection_path();
    let item = format!("{}/:id", collection);

    let reads = Router::new()
        .route(&collection, get(records::list))
        .route(&item, get(records::get))
        .route_layer(from_fn_with_state(state.clone(), require_login));

    let writes = Router::new()
        .route(&collection, post(records::create))
        .route(&item, put(records::update).delete(records::delete))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    reads.merge(writes).layer(Extension(entity))
}

fn search_routes(state: &AppState) -> Router<AppState> {
    use protected::search;

    Router::new()
        .route("/api/owners/search", get(search::owners))
        .route("/api/appointments/search", get(search::appointments))
        .route_layer(from_fn_with_state(state.clone(), require_login))
}

fn report_routes(state: &AppState) -> Router<AppState> {
    use protected::reports;

    let mut router = Router::new().route(
        "/api/stats/appointments-per-month",
        get(reports::appointments_per_month),
    );
    for view in ReportView::ALL {
        router = router.route(&view.path(), get(reports::view).layer(Extension(view)));
    }
    router.route_layer(from_fn_with_state(state.clone(), require_login))
}

fn social_routes(state: &AppState) -> Router<AppState> {
    use protected::social;

    Router::new()
        .route("/api/social/fetch", post(social::fetch))
        .route("/api/social/logs", get(social::logs))
        .route_layer(from_fn_with_state(state.clone(), require_login))
}

fn export_routes(state: &AppState) -> Router<AppState> {
    use protected::export;

    Router::new()
        .route("/api/export/owners.csv", get(export::owners_csv))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
}

/// Mirror the caller's origin with credentials, or restrict to a configured list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Unhandled error: {}", detail);
    ApiError::internal_server_error(ApiError::INTERNAL_ERROR).into_response()
}
