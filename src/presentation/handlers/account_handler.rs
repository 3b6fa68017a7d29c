use std::{num::IntErrorKind, sync::Arc};

use crate::{
    domain::{
        error::{DomainError, UniqueField},
        models::{
            account::{Account, AccountId},
            credential::PlainPassword,
        },
        repositories::{
            account_registration_repository::AccountRegistrationRepository,
            account_repository::AccountRepository,
        },
        services::password_service::PasswordHasher,
    },
    usecase::{
        get_account_usecase::GetAccountUsecase,
        register_account_usecase::{RegisterAccountUsecase, RegistrationForm},
    },
};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// Request

/// query parameters for register request
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub profile_picture: String,
}

// Response

/// json for a registered or fetched account
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountResponse {
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.id().value(),
            full_name: account.full_name().to_string(),
            email: account.email().to_string(),
            phone: account.phone().to_string(),
            profile_picture: account.profile_picture().map(str::to_string),
        }
    }
}

/// json for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            warn!(error = %self, "request rejected");
        } else {
            error!(error = %self, "request failed");
        }

        let (status, detail) = match &self {
            DomainError::DuplicateField(UniqueField::Email) => {
                (StatusCode::BAD_REQUEST, "Email already registered".to_string())
            }
            DomainError::DuplicateField(UniqueField::Phone) => {
                (StatusCode::BAD_REQUEST, "Phone already registered".to_string())
            }
            DomainError::EmptyField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            DomainError::AccountNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            DomainError::Repository(_) | DomainError::PasswordHashing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Handler failure: a domain error, or a request the extractors could not read
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    InvalidRequest(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(err) => err.into_response(),
            ApiError::InvalidRequest(detail) => {
                warn!(%detail, "malformed request");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { detail })).into_response()
            }
        }
    }
}

/// Parse the `user_id` path segment. Integers outside the id range cannot name an account.
fn parse_user_id(raw: &str) -> Result<AccountId, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) => Ok(AccountId::new(id)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(DomainError::AccountNotFound.into())
        }
        Err(_) => Err(ApiError::InvalidRequest(format!(
            "user_id must be an integer, got {:?}",
            raw
        ))),
    }
}

/* Router Function and Handler Function */

// Account Router

/// function return Router object
/// Suppose to be merged into main router
pub fn create_account_router<
    A: AccountRepository + Send + Sync + 'static + Clone,
    R: AccountRegistrationRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static + Clone,
>(
    register_service: RegisterAccountUsecase<A, R, P>,
    get_service: GetAccountUsecase<A>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
        get_service: Arc::new(get_service),
    };

    Router::new()
        .route("/register/", post(register::<A, R, P>))
        .route("/user/{user_id}", get(get_account::<A, R, P>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<A: AccountRepository, R: AccountRegistrationRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterAccountUsecase<A, R, P>>,
    pub get_service: Arc<GetAccountUsecase<A>>,
}

// handler function

/// handler function for register
async fn register<
    A: AccountRepository + Send + Sync + 'static + Clone,
    R: AccountRegistrationRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static + Clone,
>(
    State(state): State<AppState<A, R, P>>,
    query: Result<Query<RegisterRequest>, QueryRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Query(params) = query?;
    let form = RegistrationForm {
        full_name: params.full_name,
        email: params.email,
        password: PlainPassword::new(params.password)?,
        phone: params.phone,
        profile_picture: params.profile_picture,
    };

    let account = state.register_service.register(form).await?;
    info!(user_id = account.id().value(), "account registered");

    Ok(Json(account.into()))
}

/// handler function for account lookup
async fn get_account<
    A: AccountRepository + Send + Sync + 'static + Clone,
    R: AccountRegistrationRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static + Clone,
>(
    State(state): State<AppState<A, R, P>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Path(user_id) = path?;
    let account = state
        .get_service
        .get_account(parse_user_id(&user_id)?)
        .await?;

    Ok(Json(account.into()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, header},
    };
    use http_body_util::BodyExt;
    use rstest::*;
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::{
        account_registration_repository::SqlAccountRegistrationRepository,
        account_repository::SqlAccountRepository,
        argon2_password_hasher::Argon2PasswordHasher,
        schema::testing::{memory_database, row_counts},
    };

    #[rstest]
    #[case("1", 1)]
    #[case("-3", -3)]
    #[case("2147483647", i32::MAX)]
    fn test_parse_user_id_positive(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_user_id(raw).unwrap(), AccountId::new(expected));
    }

    #[rstest]
    #[case("2147483648")]
    #[case("99999999999")]
    #[case("-99999999999")]
    fn test_parse_user_id_out_of_range_is_not_found(#[case] raw: &str) {
        assert!(matches!(
            parse_user_id(raw),
            Err(ApiError::Domain(DomainError::AccountNotFound))
        ));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    fn test_parse_user_id_malformed_negative(#[case] raw: &str) {
        assert!(matches!(parse_user_id(raw), Err(ApiError::InvalidRequest(_))));
    }

    /// full stack over an in-memory database
    #[fixture]
    async fn app() -> (Router, sea_orm::DatabaseConnection) {
        let db = memory_database().await;
        let account_repository = SqlAccountRepository::new(db.clone());
        let register_service = RegisterAccountUsecase::new(
            account_repository.clone(),
            SqlAccountRegistrationRepository::new(db.clone()),
            Argon2PasswordHasher::new(),
        );
        let get_service = GetAccountUsecase::new(account_repository);
        (create_account_router(register_service, get_service), db)
    }

    async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            mime::APPLICATION_JSON.as_ref()
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_and_lookup_scenario(
        #[future] app: (Router, sea_orm::DatabaseConnection),
    ) {
        let (app, db) = app.await;

        let (status, body) = send(
            &app,
            "POST",
            "/register/?full_name=Ann%20Lee&email=ann%40example.com&password=pw1&phone=555-0100&profile_picture=pic.png",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "user_id": 1,
                "full_name": "Ann Lee",
                "email": "ann@example.com",
                "phone": "555-0100",
                "profile_picture": "pic.png",
            })
        );

        let (status, body) = send(
            &app,
            "POST",
            "/register/?full_name=Ann%20Lee&email=ann%40example.com&password=pw2&phone=555-0199&profile_picture=other.png",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "detail": "Email already registered" }));
        assert_eq!(row_counts(&db).await, (1, 1));

        let (status, body) = send(&app, "GET", "/user/1").await;
        assert_eq!(status, StatusCode::OK);
        let account: AccountResponse = serde_json::from_value(body).unwrap();
        assert_eq!(
            account,
            AccountResponse {
                user_id: 1,
                full_name: "Ann Lee".to_string(),
                email: "ann@example.com".to_string(),
                phone: "555-0100".to_string(),
                profile_picture: Some("pic.png".to_string()),
            }
        );

        let (status, body) = send(&app, "GET", "/user/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "detail": "User not found" }));
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_duplicated_phone_negative(
        #[future] app: (Router, sea_orm::DatabaseConnection),
    ) {
        let (app, db) = app.await;
        send(
            &app,
            "POST",
            "/register/?full_name=Ann&email=ann%40example.com&password=pw1&phone=555-0100&profile_picture=pic.png",
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/register/?full_name=Bob&email=bob%40example.com&password=pw1&phone=555-0100&profile_picture=pic.png",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "detail": "Phone already registered" }));
        assert_eq!(row_counts(&db).await, (1, 1));
    }

    #[rstest]
    #[tokio::test]
    async fn test_response_never_contains_password(
        #[future] app: (Router, sea_orm::DatabaseConnection),
    ) {
        let (app, _db) = app.await;

        let (_, registered) = send(
            &app,
            "POST",
            "/register/?full_name=Ann&email=ann%40example.com&password=s3cret-pw&phone=555-0100&profile_picture=pic.png",
        )
        .await;
        let (_, fetched) = send(&app, "GET", "/user/1").await;

        for body in [registered, fetched] {
            assert!(body.get("password").is_none());
            assert!(!body.to_string().contains("s3cret-pw"));
        }
    }
}
