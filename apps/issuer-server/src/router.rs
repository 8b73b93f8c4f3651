use std::any::Any;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{Request, Response};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Router, middleware};
use issuer_core::IssuerCore;
use issuer_core::config::core_config::AppConfig;
use sql_data_provider::{DataLayer, DbConn};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::ServerConfig;
use crate::dto::response::ErrorResponse;
use crate::endpoint::{self, misc, oid4vci};
use crate::middleware::get_http_request_context;

pub(crate) struct InternalAppState {
    pub core: IssuerCore,
    pub config: Arc<ServerConfig>,
}

pub(crate) type AppState = Arc<InternalAppState>;

pub async fn start_server(listener: TcpListener, config: AppConfig<ServerConfig>, db_conn: DbConn) {
    listener
        .set_nonblocking(true)
        .expect("Failed to set listener non-blocking");

    let core = IssuerCore::new(Arc::new(DataLayer::build(db_conn)), &config.core)
        .expect("Failed to initialize issuer core");

    let config = Arc::new(config.app);
    let state: AppState = Arc::new(InternalAppState {
        core,
        config: config.to_owned(),
    });

    let addr = listener.local_addr().expect("Invalid TCP listener");
    info!("Starting server at http://{addr}");

    let router = router(state, config);

    axum::serve(
        tokio::net::TcpListener::from_std(listener)
            .expect("failed to convert to tokio TcpListener"),
        router.into_make_service(),
    )
    .await
    .expect("Failed to start axum server");
}

fn router(state: AppState, config: Arc<ServerConfig>) -> Router {
    let token = post(oid4vci::controller::oid4vci_create_token);
    let credential = post(oid4vci::controller::oid4vci_create_credential);
    let issuer_metadata = get(oid4vci::controller::oid4vci_get_issuer_metadata);
    let openid_configuration = get(oid4vci::controller::oid4vci_get_openid_configuration);

    let oid4vci = Router::new()
        .route("/api/v1/token", token.clone())
        .route("/api/v1/credential", credential.clone())
        .route(
            "/api/v1/.well-known/openid-credential-issuer",
            issuer_metadata.clone(),
        )
        .route(
            "/api/v1/.well-known/openid-configuration",
            openid_configuration.clone(),
        )
        // unversioned duplicates kept for older wallets
        .route("/token", token)
        .route("/credential", credential)
        .route("/.well-known/openid-credential-issuer", issuer_metadata)
        .route("/.well-known/openid-configuration", openid_configuration);

    let mut technical_endpoints = Router::new().route("/health", get(misc::health_check));

    if config.enable_metrics {
        technical_endpoints = technical_endpoints.route("/metrics", get(misc::get_metrics));
    }

    if config.enable_open_api {
        let openapi_documentation = gen_openapi_documentation();
        technical_endpoints = technical_endpoints.route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(openapi_documentation) }),
        );
    }

    Router::new()
        .merge(oid4vci)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let context = get_http_request_context(request);
                    info_span!(
                        "http_request",
                        method = context.method,
                        path = context.path,
                        service = "issuer",
                        RequestId = context.request_id,
                    )
                })
                .on_request(|request: &Request<_>, _span: &Span| {
                    tracing::debug!(
                        "SERVICE CALL START {} {}",
                        request.method(),
                        request.uri().path()
                    )
                })
                .on_failure(|_, _, _: &_| {}) // override default on_failure handler
                .on_response(|response: &Response<_>, _: Duration, _span: &Span| {
                    tracing::debug!("SERVICE CALL END {}", response.status())
                }),
        )
        .layer(middleware::from_fn(crate::middleware::metrics_counter))
        .merge(technical_endpoints)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!("Panic: {message}");

    ErrorResponse::for_panic(message).into_response()
}

pub fn gen_openapi_documentation() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        paths(
            endpoint::oid4vci::controller::oid4vci_create_token,
            endpoint::oid4vci::controller::oid4vci_create_credential,
            endpoint::oid4vci::controller::oid4vci_get_issuer_metadata,
            endpoint::oid4vci::controller::oid4vci_get_openid_configuration,

            endpoint::misc::health_check,
            endpoint::misc::get_metrics,
        ),
        components(
            schemas(
                endpoint::oid4vci::dto::OpenID4VCITokenRequestRestDTO,
                endpoint::oid4vci::dto::OpenID4VCITokenResponseRestDTO,
                endpoint::oid4vci::dto::OpenID4VCICredentialRequestRestDTO,
                endpoint::oid4vci::dto::OpenID4VCIProofRequestRestDTO,
                endpoint::oid4vci::dto::CredentialResponseEncryptionRestDTO,
                endpoint::oid4vci::dto::PublicJwkRestDTO,

                crate::dto::error::ErrorResponseRestDTO,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "oid4vci", description = "OpenID for Verifiable Credential Issuance"),
            (name = "other", description = "Other utility endpoints"),
        ),
    )]
    struct ApiDoc;

    struct SecurityAddon;

    impl Modify for SecurityAddon {
        fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
            if let Some(components) = openapi.components.as_mut() {
                components.add_security_scheme(
                    "OpenID4VCI",
                    SecurityScheme::Http(
                        HttpBuilder::new()
                            .scheme(HttpAuthScheme::Bearer)
                            .description(Some("Access token from the token endpoint"))
                            .build(),
                    ),
                )
            }
        }
    }

    let mut docs = ApiDoc::openapi();
    docs.info.title = "Issuer OID4VCI API".into();
    docs.info.version = env!("CARGO_PKG_VERSION").into();
    docs
}
