//! API Routes
//!
//! Configures the Axum router with all employee server endpoints.

use std::any::Any;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};

use super::handlers::{
    create_employee_handler, delete_all_employees_handler, delete_employee_handler,
    get_all_employees_handler, get_by_key_handler, health_handler, update_employee_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /employee/` - Create an employee (auth)
/// - `GET /employee/` - List all employees
/// - `DELETE /employee/` - Delete all employees (auth)
/// - `GET /employee/:id/` - Get one employee by numeric id
/// - `GET /employee/:lastName/` - List employees by last name
/// - `PUT /employee/:id/` - Replace an employee (auth)
/// - `DELETE /employee/:id/` - Delete an employee (auth)
/// - `GET /health` - Health check endpoint
///
/// Every employee path is also served without its trailing slash.
pub fn create_router(state: AppState) -> Router {
    let collection = get(get_all_employees_handler)
        .post(create_employee_handler)
        .delete(delete_all_employees_handler);

    let member = get(get_by_key_handler)
        .put(update_employee_handler)
        .delete(delete_employee_handler);

    let router = Router::new()
        .route("/employee/", collection.clone())
        .route("/employee", collection)
        .route("/employee/:key/", member.clone())
        .route("/employee/:key", member)
        .route("/health", get(health_handler))
        .with_state(state);

    with_common_layers(router)
}

/// Applies the cross-cutting middleware shared by every route.
///
/// # Middleware
/// - Panic recovery: a panicking handler answers 500 and is logged
/// - Tracing: one INFO access-log line per response
/// - CORS: Allows any origin to send Basic credentials and JSON bodies
pub fn with_common_layers(router: Router) -> Router {
    // `Authorization` is never covered by a wildcard allow-list.
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router
        .layer(cors)
        .layer(trace)
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Converts a caught handler panic into a generic 500 response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = err.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = err.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::auth::StaticCredentials;
    use crate::config::DEFAULT_LOG_FILTER;
    use crate::storage::EmployeeStore;
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt;
    use tracing_subscriber::EnvFilter;

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn create_test_app() -> Router {
        let state = AppState::new(EmployeeStore::new(), StaticCredentials::default());
        create_router(state)
    }

    async fn panicking_handler() -> &'static str {
        panic!("handler blew up")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_endpoint_with_and_without_slash() {
        let app = create_test_app();

        for uri in ["/employee/", "/employee"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        }
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/employee/5/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_requires_auth() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/employee/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"firstName":"Ann","lastName":"Lee","email":"a@x.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key("www-authenticate"));
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/employee/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_delete_by_last_name_not_allowed() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/employee/Lee/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_panic_is_recovered() {
        let app = with_common_layers(Router::new().route("/panic", get(panicking_handler)));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/panic").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // The router keeps serving after a panic
        let response = app
            .oneshot(Request::builder().uri("/panic").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_reads_are_logged_at_default_filter() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_LOG_FILTER))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = create_test_app();
        for uri in ["/employee/", "/employee/5/"] {
            app.clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
        }

        let output = logs.contents();
        assert!(output.contains("/employee/5/"), "{}", output);
        assert!(output.contains("status=200"), "{}", output);
        assert!(output.contains("status=404"), "{}", output);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_authorization() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/employee/")
                    .header("origin", "https://client.example")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "authorization,content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let allowed = response
            .headers()
            .get("access-control-allow-headers")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        assert!(allowed.contains("authorization"), "{}", allowed);
        assert!(allowed.contains("content-type"), "{}", allowed);
        assert_ne!(allowed, "*");
    }
}
