//! HTTP handlers for the Maven-style resource gateway.
//!
//! Upload (PUT), download (GET), and metadata (HEAD) over `/maven/{path}`.
//! Every operation authenticates against the access record store; the object
//! key is the request path with the `/maven/` prefix stripped.

use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::header::{
    AUTHORIZATION, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ETAG, WWW_AUTHENTICATE,
};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::{debug, info};

use crate::domain::license::{AccessRecord, Identity};

use super::GatewayAppState;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// PUT /maven/{path} - store an artifact
pub async fn handle_upload(
    State(state): State<GatewayAppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    let record = authenticate(&state, &headers)
        .await?
        .ok_or_else(|| GatewayError::unauthorized(&state.realm))?;

    if !record.can_write() {
        debug!(key = %path, "upload refused, write capability required");
        return Err(GatewayError::Forbidden);
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    state
        .content
        .put(&path, body.to_vec(), content_type)
        .await
        .map_err(|e| GatewayError::Dependency(e.to_string()))?;

    info!(key = %path, content_type, "artifact uploaded");
    Ok((StatusCode::CREATED, "Uploaded"))
}

/// GET /maven/{path} - serve an artifact
pub async fn handle_download(
    State(state): State<GatewayAppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let record = authenticate(&state, &headers)
        .await?
        .ok_or_else(|| GatewayError::unauthorized(&state.realm))?;

    // Coarse check only: any access level suffices for download. Per-grant
    // expiry is not consulted here (see DESIGN.md).
    if !record.has_any_access() {
        return Err(GatewayError::unauthorized(&state.realm));
    }

    let object = state
        .content
        .get(&path)
        .await
        .map_err(|e| GatewayError::Dependency(e.to_string()))?
        .ok_or(GatewayError::NotFound)?;

    debug!(key = %path, size = object.len(), "serving artifact");

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, object.content_type.as_str())
        .header(CONTENT_LENGTH, object.len())
        .header(CACHE_CONTROL, "public, max-age=31536000, immutable")
        .header(ETAG, object.etag.as_str())
        .body(Body::from(object.bytes))
        .map_err(|e| GatewayError::Dependency(e.to_string()))
}

/// HEAD /maven/{path} - artifact metadata (reserved)
pub async fn handle_metadata() -> impl IntoResponse {
    StatusCode::NOT_IMPLEMENTED
}

/// Authenticates the request's Basic credentials against the record store.
///
/// Returns `None` for anything short of valid credentials: missing header,
/// wrong scheme, undecodable payload, unknown identity, or bad password.
/// Malformed input never fails the request.
async fn authenticate(
    state: &GatewayAppState,
    headers: &HeaderMap,
) -> Result<Option<AccessRecord>, GatewayError> {
    let Some((identity, password)) = parse_basic_credentials(headers) else {
        debug!("no usable Basic credentials on request");
        return Ok(None);
    };

    state
        .license
        .authenticate(&Identity::new(&identity), &password)
        .await
        .map_err(|e| GatewayError::Dependency(e.to_string()))
}

/// Extracts identity and password from an `Authorization: Basic` header.
///
/// The decoded payload is split once on the first colon, so passwords may
/// contain colons.
fn parse_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (identity, password) = decoded.split_once(':')?;
    Some((identity.to_string(), password.to_string()))
}

/// Gateway error type that converts to HTTP responses.
#[derive(Debug)]
pub enum GatewayError {
    /// No or invalid credentials; carries the challenge realm.
    Unauthorized { realm: String },
    /// Authenticated but lacking the required access level.
    Forbidden,
    /// No object under the requested key.
    NotFound,
    /// A backing store failed.
    Dependency(String),
}

impl GatewayError {
    fn unauthorized(realm: &str) -> Self {
        GatewayError::Unauthorized {
            realm: realm.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Unauthorized { realm } => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", realm))],
                "Unauthorized",
            )
                .into_response(),
            GatewayError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            GatewayError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            GatewayError::Dependency(reason) => {
                tracing::error!(reason, "gateway dependency failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::adapters::alerts::TracingAlerts;
    use crate::adapters::http::gateway_router;
    use crate::adapters::store::{InMemoryContentStore, InMemoryRecordStore};
    use crate::application::LicenseService;
    use crate::config::ProductMap;
    use crate::domain::license::{AccessLevel, Identity};
    use crate::domain::webhook::SignatureVerifier;
    use crate::ports::{ContentStore, RecordStore};

    const DERIVATION_SECRET: &str = "dsec-test";

    struct TestGateway {
        records: Arc<InMemoryRecordStore>,
        content: Arc<InMemoryContentStore>,
        license: Arc<LicenseService>,
        state: GatewayAppState,
    }

    fn test_gateway() -> TestGateway {
        let records = Arc::new(InMemoryRecordStore::new());
        let content = Arc::new(InMemoryContentStore::new());
        let license = Arc::new(LicenseService::new(records.clone(), DERIVATION_SECRET));
        let state = GatewayAppState {
            license: license.clone(),
            content: content.clone(),
            alerts: Arc::new(TracingAlerts::new()),
            verifier: Arc::new(SignatureVerifier::new("whsec-test")),
            products: Arc::new(ProductMap::default()),
            enforce_signature: true,
            realm: "Maven Repository".to_string(),
        };
        TestGateway {
            records,
            content,
            license,
            state,
        }
    }

    /// Provision a user with a grant and the given access level, returning
    /// their Basic authorization header value.
    async fn provision_user(gateway: &TestGateway, email: &str, level: AccessLevel) -> String {
        let identity = Identity::new(email);
        gateway
            .license
            .grant(
                &identity,
                "com/example/product1",
                chrono::Utc::now() + chrono::Duration::days(365),
            )
            .await
            .unwrap();

        if level != AccessLevel::Read {
            let versioned = gateway.records.load(&identity).await.unwrap().unwrap();
            let mut record = versioned.record;
            record.access_level = level;
            gateway
                .records
                .store(&identity, &record, Some(versioned.version))
                .await
                .unwrap();
        }

        let password = gateway.license.password_for(&identity);
        format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", identity.as_str(), password))
        )
    }

    async fn send(gateway: &TestGateway, request: Request<Body>) -> Response {
        let router = gateway_router(gateway.state.clone());
        router.oneshot(request).await.unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Upload Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn upload_with_write_level_stores_object_and_returns_201() {
        let gateway = test_gateway();
        let auth = provision_user(&gateway, "writer@example.com", AccessLevel::Write).await;

        let request = Request::builder()
            .method("PUT")
            .uri("/maven/com/example/a.jar")
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/java-archive")
            .body(Body::from("jar bytes"))
            .unwrap();

        let response = send(&gateway, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let object = gateway
            .content
            .get("com/example/a.jar")
            .await
            .unwrap()
            .expect("object stored under prefix-stripped key");
        assert_eq!(object.bytes, b"jar bytes");
        assert_eq!(object.content_type, "application/java-archive");
    }

    #[tokio::test]
    async fn upload_defaults_content_type_to_octet_stream() {
        let gateway = test_gateway();
        let auth = provision_user(&gateway, "writer@example.com", AccessLevel::Write).await;

        let request = Request::builder()
            .method("PUT")
            .uri("/maven/com/example/a.jar")
            .header(AUTHORIZATION, auth)
            .body(Body::from("bytes"))
            .unwrap();

        assert_eq!(send(&gateway, request).await.status(), StatusCode::CREATED);
        let object = gateway.content.get("com/example/a.jar").await.unwrap().unwrap();
        assert_eq!(object.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn upload_with_read_level_is_403() {
        let gateway = test_gateway();
        let auth = provision_user(&gateway, "reader@example.com", AccessLevel::Read).await;

        let request = Request::builder()
            .method("PUT")
            .uri("/maven/com/example/a.jar")
            .header(AUTHORIZATION, auth)
            .body(Body::from("bytes"))
            .unwrap();

        assert_eq!(send(&gateway, request).await.status(), StatusCode::FORBIDDEN);
        assert_eq!(gateway.content.object_count().await, 0);
    }

    #[tokio::test]
    async fn upload_without_credentials_is_401() {
        let gateway = test_gateway();
        let request = Request::builder()
            .method("PUT")
            .uri("/maven/com/example/a.jar")
            .body(Body::from("bytes"))
            .unwrap();

        let response = send(&gateway, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(WWW_AUTHENTICATE));
    }

    // ══════════════════════════════════════════════════════════════
    // Download Tests
    // ══════════════════════════════════════════════════════════════

    async fn store_artifact(gateway: &TestGateway) {
        gateway
            .content
            .put("com/example/a.jar", b"jar bytes".to_vec(), "application/java-archive")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn download_with_read_level_serves_object_with_headers() {
        let gateway = test_gateway();
        let auth = provision_user(&gateway, "reader@example.com", AccessLevel::Read).await;
        store_artifact(&gateway).await;

        let request = Request::builder()
            .method("GET")
            .uri("/maven/com/example/a.jar")
            .header(AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap();

        let response = send(&gateway, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers[CONTENT_TYPE.as_str()], "application/java-archive");
        assert_eq!(headers[CONTENT_LENGTH.as_str()], "9");
        assert_eq!(
            headers[CACHE_CONTROL.as_str()],
            "public, max-age=31536000, immutable"
        );
        assert!(headers.contains_key(ETAG.as_str()));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"jar bytes");
    }

    #[tokio::test]
    async fn download_with_write_level_also_succeeds() {
        let gateway = test_gateway();
        let auth = provision_user(&gateway, "writer@example.com", AccessLevel::Write).await;
        store_artifact(&gateway).await;

        let request = Request::builder()
            .method("GET")
            .uri("/maven/com/example/a.jar")
            .header(AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap();

        assert_eq!(send(&gateway, request).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn download_without_authorization_header_is_401_with_challenge() {
        let gateway = test_gateway();
        store_artifact(&gateway).await;

        let request = Request::builder()
            .method("GET")
            .uri("/maven/com/example/a.jar")
            .body(Body::empty())
            .unwrap();

        let response = send(&gateway, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[WWW_AUTHENTICATE.as_str()],
            "Basic realm=\"Maven Repository\""
        );
    }

    #[tokio::test]
    async fn download_with_wrong_password_is_401() {
        let gateway = test_gateway();
        provision_user(&gateway, "reader@example.com", AccessLevel::Read).await;
        store_artifact(&gateway).await;

        let bogus = format!("Basic {}", BASE64.encode("reader@example.com:wrong"));
        let request = Request::builder()
            .method("GET")
            .uri("/maven/com/example/a.jar")
            .header(AUTHORIZATION, bogus)
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            send(&gateway, request).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn download_with_none_level_is_401() {
        let gateway = test_gateway();
        let auth = provision_user(&gateway, "revoked@example.com", AccessLevel::None).await;
        store_artifact(&gateway).await;

        let request = Request::builder()
            .method("GET")
            .uri("/maven/com/example/a.jar")
            .header(AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            send(&gateway, request).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn download_of_missing_object_is_404() {
        let gateway = test_gateway();
        let auth = provision_user(&gateway, "reader@example.com", AccessLevel::Read).await;

        let request = Request::builder()
            .method("GET")
            .uri("/maven/com/example/missing.jar")
            .header(AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap();

        assert_eq!(send(&gateway, request).await.status(), StatusCode::NOT_FOUND);
    }

    // ══════════════════════════════════════════════════════════════
    // Metadata & Auth Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn head_request_is_501() {
        let gateway = test_gateway();
        let request = Request::builder()
            .method("HEAD")
            .uri("/maven/com/example/a.jar")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            send(&gateway, request).await.status(),
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[tokio::test]
    async fn malformed_basic_header_is_401_not_500() {
        let gateway = test_gateway();
        store_artifact(&gateway).await;

        let cases = [
            "Bearer token".to_string(),
            "Basic !!!not-base64!!!".to_string(),
            "Basic".to_string(),
            // Valid base64 but no colon separator.
            format!("Basic {}", BASE64.encode("no-colon-here")),
        ];
        for bad in &cases {
            let request = Request::builder()
                .method("GET")
                .uri("/maven/com/example/a.jar")
                .header(AUTHORIZATION, bad.as_str())
                .body(Body::empty())
                .unwrap();
            assert_eq!(
                send(&gateway, request).await.status(),
                StatusCode::UNAUTHORIZED,
                "header {:?} should be unauthenticated",
                bad
            );
        }
    }

    #[test]
    fn basic_credentials_split_on_first_colon_only() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            format!("Basic {}", BASE64.encode("user@example.com:pa:ss:word"))
                .parse()
                .unwrap(),
        );

        let (identity, password) = parse_basic_credentials(&headers).unwrap();
        assert_eq!(identity, "user@example.com");
        assert_eq!(password, "pa:ss:word");
    }
}
