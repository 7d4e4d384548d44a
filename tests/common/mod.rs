//! Common test utilities for e2e tests
//!
//! Spins up a PostgreSQL container and wiremock servers standing in for the
//! Gemini and Twilio APIs, then builds the real router on top of them.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tower::util::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use author_chat::domain::gateways::{AuthorRepository, BookRepository};
use author_chat::domain::models::{Author, Book, WhatsAppNumber};
use author_chat::infrastructure::driven_adapters::config::AppConfig;
use author_chat::infrastructure::driven_adapters::{
    database, PostgresAuthorRepository, PostgresBookRepository,
};
use author_chat::infrastructure::driving_adapters::api_rest::{create_router, AppState};

/// Test JWT secret (minimum 32 characters)
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-key-for-e2e-testing-only-min-32-chars";

pub const AUTHOR_NAME: &str = "Slavoj Zizek";
pub const AUTHOR_NUMBER: &str = "+15559999";
pub const USER_NUMBER: &str = "+15550001";

pub const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";
pub const TWILIO_PATH: &str = "/2010-04-01/Accounts/ACtest/Messages.json";

/// JWT claims for test tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct TestClaims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub gemini: MockServer,
    pub twilio: MockServer,
    pub jwt_token: String,
    _container: ContainerAsync<Postgres>,
}

impl TestApp {
    /// Create a new test application with a fresh PostgreSQL database
    pub async fn new() -> Self {
        Self::with_default_author(None).await
    }

    pub async fn with_default_author(default_author: Option<&str>) -> Self {
        let container = Postgres::default()
            .with_tag("16-alpine")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");
        let database_url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

        let gemini = MockServer::start().await;
        let twilio = MockServer::start().await;

        let config = create_test_config(&database_url, &gemini.uri(), &twilio.uri(), default_author);

        let pool = database::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");
        database::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config, pool.clone()).expect("Failed to build application state");
        let router = create_router(state);

        Self {
            router,
            pool,
            gemini,
            twilio,
            jwt_token: generate_test_token(),
            _container: container,
        }
    }

    /// Get the authorization header value for requests
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Store the test author with the given books
    pub async fn seed_author_with_books(&self, titles: &[&str]) {
        let author = Author::new(AUTHOR_NAME)
            .with_whatsapp_number(WhatsAppNumber::parse(AUTHOR_NUMBER).expect("valid number"));
        PostgresAuthorRepository::new(self.pool.clone())
            .upsert(&author)
            .await
            .expect("Failed to seed author");

        let books = PostgresBookRepository::new(self.pool.clone());
        for title in titles {
            books
                .upsert(&Book::new(*title, format!("Full text of {title}"), AUTHOR_NAME))
                .await
                .expect("Failed to seed book");
        }
    }

    /// Answer every per-book prompt with `book_answer` and the merge prompt with `reply`
    pub async fn mock_gemini(&self, book_answer: &str, reply: &str) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .and(body_string_contains("Please synthesize"))
            .respond_with(gemini_text(reply))
            .with_priority(1)
            .mount(&self.gemini)
            .await;

        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .respond_with(gemini_text(book_answer))
            .mount(&self.gemini)
            .await;
    }

    /// Accept outgoing messages, expecting exactly `times` of them
    pub async fn mock_twilio(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path(TWILIO_PATH))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "sid": "SMtest", "status": "queued" })),
            )
            .expect(times)
            .mount(&self.twilio)
            .await;
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn send_whatsapp(&self, body: &str) -> Response<Body> {
        let form = format!(
            "Body={}&From=whatsapp%3A%2B15550001&To=whatsapp%3A%2B15559999&NumMedia=0",
            body.replace(' ', "+").replace('?', "%3F")
        );
        self.post_form("/webhook/twilio", &form).await
    }

    pub async fn admin_request(&self, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, self.auth_header());

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

fn gemini_text(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    }))
}

/// Create a test configuration pointing at the container and mock servers
fn create_test_config(
    database_url: &str,
    gemini_url: &str,
    twilio_url: &str,
    default_author: Option<&str>,
) -> AppConfig {
    use config::{Config, File, FileFormat};

    let default_author = default_author
        .map(|name| format!("default_author = \"{name}\""))
        .unwrap_or_default();

    let config_str = format!(
        r#"
environment = "test"

[server]
host = "127.0.0.1"
port = 0

[database]
url = "{database_url}"
max_connections = 5
min_connections = 1

[jwt]
secret = "{TEST_JWT_SECRET}"

[twilio]
account_sid = "ACtest"
auth_token = "twilio-token"
phone_number = "{AUTHOR_NUMBER}"
base_url = "{twilio_url}"

[llm]
provider = "gemini"
api_key = "gemini-key"
model = "gemini-1.5-flash"
max_tokens = 256
temperature = 0.5
base_url = "{gemini_url}"

[processing]
max_concurrent_books = 2
response_timeout = 5
aggregation_timeout = 5
{default_author}
"#
    );

    let config: AppConfig = Config::builder()
        .add_source(File::from_str(&config_str, FileFormat::Toml))
        .build()
        .expect("Failed to build test config")
        .try_deserialize()
        .expect("Failed to deserialize test config");
    config.validate().expect("Invalid test config");
    config
}

/// Generate a valid JWT token for testing
pub fn generate_test_token() -> String {
    token_with_expiry(Utc::now().timestamp() + 3600)
}

/// Generate an expired JWT token for testing unauthorized scenarios
pub fn generate_expired_token() -> String {
    token_with_expiry(Utc::now().timestamp() - 3600)
}

fn token_with_expiry(exp: i64) -> String {
    let claims = TestClaims {
        sub: "operator-1".to_string(),
        role: "admin".to_string(),
        iat: exp - 7200,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to generate test JWT token")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Error response structure for deserialization
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
