use crate::{
    abstract_trait::account::DynCreateAccountService,
    domain::{
        requests::{CreateAccountRequest, SignUpRequest},
        response::SignUpResponse,
    },
    middleware::json::AcceptedJson,
    model::account::Account,
};
use axum::{Extension, routing::post};
use shared::{
    abstract_trait::DynEmailValidator,
    errors::{ErrorResponse, HttpError, ServiceError},
};
use std::{fmt, sync::Arc};
use tracing::{debug, error};
use utoipa_axum::router::OpenApiRouter;

/// Sign-up boundary.
///
/// Runs the field checks in a fixed order and stops at the first rejection. Anything the
/// email validator or the create-account service fails with becomes an opaque
/// `ServerError`; this is the only place such failures are turned into a response.
pub struct SignUpController {
    email_validator: DynEmailValidator,
    create_account: DynCreateAccountService,
}

impl fmt::Debug for SignUpController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpController")
            .field("email_validator", &"DynEmailValidator")
            .field("create_account", &"DynCreateAccountService")
            .finish()
    }
}

impl SignUpController {
    pub fn new(email_validator: DynEmailValidator, create_account: DynCreateAccountService) -> Self {
        Self {
            email_validator,
            create_account,
        }
    }

    pub async fn handle(&self, req: SignUpRequest) -> SignUpResponse {
        match self.sign_up(req).await {
            Ok(response) => response,
            Err(e) => {
                error!("❌ Sign-up failed: {e}");
                SignUpResponse::server_error()
            }
        }
    }

    async fn sign_up(&self, req: SignUpRequest) -> Result<SignUpResponse, ServiceError> {
        let fields = req.required_fields();

        for (field, value) in fields {
            if value.is_none_or(str::is_empty) {
                return Ok(reject(HttpError::MissingParam(field)));
            }
        }

        let [name, email, password, password_confirmation] =
            fields.map(|(_, value)| value.unwrap_or_default());

        if password != password_confirmation {
            return Ok(reject(HttpError::InvalidParam("passwordConfirmation")));
        }

        if !self.email_validator.is_valid(email)? {
            return Ok(reject(HttpError::InvalidParam("email")));
        }

        let command = CreateAccountRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let account = self.create_account.create(&command).await?;

        Ok(SignUpResponse::ok(account))
    }
}

fn reject(err: HttpError) -> SignUpResponse {
    debug!(
        field = err.field().unwrap_or_default(),
        "Sign-up rejected: {}",
        err.name()
    );
    SignUpResponse::bad_request(err)
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created", body = Account),
        (status = 400, description = "Missing or invalid param", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn signup_handler(
    Extension(controller): Extension<Arc<SignUpController>>,
    AcceptedJson(body): AcceptedJson<SignUpRequest>,
) -> SignUpResponse {
    controller.handle(body).await
}

pub fn signup_routes(controller: Arc<SignUpController>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/auth/signup", post(signup_handler))
        .layer(Extension(controller))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{requests::InsertAccountRequest, response::SignUpBody},
        service::create_account::{CreateAccountService, CreateAccountServiceDeps},
        test_utils::{
            AccountRepositoryStub, CreateAccountServiceStub, EmailValidatorStub, EncrypterStub,
            LEAKED_DETAIL,
        },
    };
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use prometheus_client::registry::Registry;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct Sut {
        sut: SignUpController,
        email_validator: Arc<EmailValidatorStub>,
        create_account: Arc<CreateAccountServiceStub>,
    }

    fn make_sut(email_validator: EmailValidatorStub, create_account: CreateAccountServiceStub) -> Sut {
        let email_validator = Arc::new(email_validator);
        let create_account = Arc::new(create_account);
        let sut = SignUpController::new(email_validator.clone(), create_account.clone());

        Sut {
            sut,
            email_validator,
            create_account,
        }
    }

    fn default_sut() -> Sut {
        make_sut(
            EmailValidatorStub::accepting(),
            CreateAccountServiceStub::succeeding(),
        )
    }

    fn request(name: &str, email: &str, password: &str, confirmation: &str) -> SignUpRequest {
        SignUpRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            password_confirmation: Some(confirmation.into()),
        }
    }

    fn valid_request() -> SignUpRequest {
        request("teste", "teste@teste.com", "123456", "123456")
    }

    fn assert_rejected(response: SignUpResponse, expected: HttpError) {
        assert_eq!(response.status_code, expected.status_code());
        assert_eq!(response.body, SignUpBody::Error(expected));
    }

    #[tokio::test]
    async fn returns_400_if_no_name_is_provided() {
        let Sut { sut, .. } = default_sut();

        let response = sut
            .handle(SignUpRequest {
                name: None,
                ..valid_request()
            })
            .await;

        assert_rejected(response, HttpError::MissingParam("name"));
    }

    #[tokio::test]
    async fn returns_400_if_no_email_is_provided() {
        let Sut { sut, .. } = default_sut();

        let response = sut
            .handle(SignUpRequest {
                email: None,
                ..valid_request()
            })
            .await;

        assert_rejected(response, HttpError::MissingParam("email"));
    }

    #[tokio::test]
    async fn returns_400_if_no_password_is_provided() {
        let Sut { sut, .. } = default_sut();

        let response = sut
            .handle(SignUpRequest {
                password: None,
                ..valid_request()
            })
            .await;

        assert_rejected(response, HttpError::MissingParam("password"));
    }

    #[tokio::test]
    async fn returns_400_if_no_password_confirmation_is_provided() {
        let Sut { sut, .. } = default_sut();

        let response = sut
            .handle(SignUpRequest {
                password_confirmation: None,
                ..valid_request()
            })
            .await;

        assert_rejected(response, HttpError::MissingParam("passwordConfirmation"));
    }

    #[tokio::test]
    async fn empty_string_counts_as_missing() {
        let Sut { sut, .. } = default_sut();

        let response = sut.handle(request("", "a@b.com", "x", "x")).await;

        assert_rejected(response, HttpError::MissingParam("name"));
    }

    #[tokio::test]
    async fn reports_the_first_missing_field_in_order() {
        let Sut { sut, .. } = default_sut();

        let response = sut
            .handle(SignUpRequest {
                name: Some("teste".into()),
                email: Some(String::new()),
                password: None,
                password_confirmation: None,
            })
            .await;
        assert_rejected(response, HttpError::MissingParam("email"));

        let response = sut.handle(SignUpRequest::default()).await;
        assert_rejected(response, HttpError::MissingParam("name"));
    }

    #[tokio::test]
    async fn missing_field_stops_before_any_collaborator() {
        let Sut {
            sut,
            email_validator,
            create_account,
        } = default_sut();

        sut.handle(SignUpRequest {
            password: None,
            ..valid_request()
        })
        .await;

        assert!(email_validator.calls.lock().unwrap().is_empty());
        assert!(create_account.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn returns_400_if_password_confirmation_fails() {
        let Sut { sut, .. } = default_sut();

        let response = sut
            .handle(request("Ann", "a@b.com", "x", "y"))
            .await;

        assert_rejected(response, HttpError::InvalidParam("passwordConfirmation"));
    }

    #[tokio::test]
    async fn confirmation_mismatch_wins_over_an_invalid_email() {
        let Sut {
            sut,
            email_validator,
            ..
        } = make_sut(
            EmailValidatorStub::rejecting(),
            CreateAccountServiceStub::succeeding(),
        );

        let response = sut.handle(request("Ann", "bad", "x", "y")).await;

        assert_rejected(response, HttpError::InvalidParam("passwordConfirmation"));
        assert!(email_validator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn returns_400_if_an_invalid_email_is_provided() {
        let Sut {
            sut,
            create_account,
            ..
        } = make_sut(
            EmailValidatorStub::rejecting(),
            CreateAccountServiceStub::succeeding(),
        );

        let response = sut.handle(request("Ann", "bad", "x", "x")).await;

        assert_rejected(response, HttpError::InvalidParam("email"));
        assert!(create_account.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn calls_email_validator_with_correct_email() {
        let Sut {
            sut,
            email_validator,
            ..
        } = default_sut();

        sut.handle(valid_request()).await;

        assert_eq!(*email_validator.calls.lock().unwrap(), vec!["teste@teste.com"]);
    }

    #[tokio::test]
    async fn returns_500_if_email_validator_fails() {
        let Sut { sut, .. } = make_sut(
            EmailValidatorStub::failing(),
            CreateAccountServiceStub::succeeding(),
        );

        let response = sut.handle(valid_request()).await;

        assert_rejected(response.clone(), HttpError::ServerError);
        let body = serde_json::to_string(&response.body).unwrap();
        assert!(!body.contains(LEAKED_DETAIL));
    }

    #[tokio::test]
    async fn calls_create_account_with_correct_values() {
        let Sut {
            sut,
            create_account,
            ..
        } = default_sut();

        sut.handle(valid_request()).await;

        assert_eq!(
            *create_account.calls.lock().unwrap(),
            vec![CreateAccountRequest {
                name: "teste".into(),
                email: "teste@teste.com".into(),
                password: "123456".into(),
            }]
        );
    }

    #[tokio::test]
    async fn returns_500_if_create_account_fails() {
        let Sut { sut, .. } = make_sut(
            EmailValidatorStub::accepting(),
            CreateAccountServiceStub::failing(),
        );

        let response = sut.handle(valid_request()).await;

        assert_rejected(response, HttpError::ServerError);
    }

    #[tokio::test]
    async fn returns_200_with_the_created_account() {
        let Sut { sut, .. } = default_sut();

        let response = sut.handle(valid_request()).await;

        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(
            response.body,
            SignUpBody::Account(Account {
                id: "valid_id".into(),
                name: "teste".into(),
                email: "teste@teste.com".into(),
                password_hash: "hashed_password".into(),
            })
        );
    }

    #[test]
    fn reject_answers_400_with_the_field_error() {
        let response = reject(HttpError::InvalidParam("email"));

        assert_rejected(response, HttpError::InvalidParam("email"));
    }

    #[tokio::test]
    async fn same_input_gets_the_same_outcome() {
        let Sut { sut, .. } = default_sut();

        let first = sut.handle(request("Ann", "a@b.com", "x", "y")).await;
        let second = sut.handle(request("Ann", "a@b.com", "x", "y")).await;

        assert_eq!(first, second);
    }

    struct Wired {
        sut: SignUpController,
        encrypter: Arc<EncrypterStub>,
        repository: Arc<AccountRepositoryStub>,
    }

    fn wire(encrypter: EncrypterStub, repository: AccountRepositoryStub) -> Wired {
        let encrypter = Arc::new(encrypter);
        let repository = Arc::new(repository);
        let service = CreateAccountService::new(
            CreateAccountServiceDeps {
                hashing: encrypter.clone(),
                command: repository.clone(),
            },
            &mut Registry::default(),
        )
        .unwrap();

        Wired {
            sut: SignUpController::new(Arc::new(EmailValidatorStub::accepting()), Arc::new(service)),
            encrypter,
            repository,
        }
    }

    #[tokio::test]
    async fn creates_the_account_end_to_end() {
        let Wired {
            sut,
            encrypter,
            repository,
        } = wire(
            EncrypterStub::returning("hash123"),
            AccountRepositoryStub::assigning("1"),
        );

        let response = sut
            .handle(request("Ann", "a@b.com", "secret", "secret"))
            .await;

        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(
            response.body,
            SignUpBody::Account(Account {
                id: "1".into(),
                name: "Ann".into(),
                email: "a@b.com".into(),
                password_hash: "hash123".into(),
            })
        );
        assert_eq!(*encrypter.calls.lock().unwrap(), vec!["secret"]);
        assert_eq!(
            *repository.calls.lock().unwrap(),
            vec![InsertAccountRequest {
                name: "Ann".into(),
                email: "a@b.com".into(),
                password_hash: "hash123".into(),
            }]
        );
    }

    #[tokio::test]
    async fn repository_failure_becomes_server_error() {
        let Wired { sut, .. } = wire(
            EncrypterStub::returning("hash123"),
            AccountRepositoryStub::failing(),
        );

        let response = sut
            .handle(request("Ann", "a@b.com", "secret", "secret"))
            .await;

        assert_rejected(response, HttpError::ServerError);
    }

    #[tokio::test]
    async fn encrypter_failure_becomes_server_error() {
        let Wired { sut, repository, .. } =
            wire(EncrypterStub::failing(), AccountRepositoryStub::assigning("1"));

        let response = sut
            .handle(request("Ann", "a@b.com", "secret", "secret"))
            .await;

        assert_rejected(response, HttpError::ServerError);
        assert!(repository.calls.lock().unwrap().is_empty());
    }

    async fn post_signup(controller: SignUpController, body: &str) -> (StatusCode, Value) {
        let (router, _) = signup_routes(Arc::new(controller)).split_for_parts();

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/auth/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn http_success_returns_the_account_json() {
        let Wired { sut, .. } = wire(
            EncrypterStub::returning("hash123"),
            AccountRepositoryStub::assigning("1"),
        );
        let body = json!({
            "name": "Ann",
            "email": "a@b.com",
            "password": "secret",
            "passwordConfirmation": "secret",
        });

        let (status, json) = post_signup(sut, &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "id": "1",
                "name": "Ann",
                "email": "a@b.com",
                "passwordHash": "hash123",
            })
        );
    }

    #[tokio::test]
    async fn http_missing_field_returns_error_json() {
        let Sut { sut, .. } = default_sut();
        let body = json!({
            "name": "Ann",
            "password": "secret",
            "passwordConfirmation": "secret",
        });

        let (status, json) = post_signup(sut, &body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({ "name": "MissingParamError", "message": "Missing param: email" })
        );
    }

    #[tokio::test]
    async fn http_server_error_hides_the_cause() {
        let Wired { sut, .. } = wire(
            EncrypterStub::returning("hash123"),
            AccountRepositoryStub::failing(),
        );
        let body = json!({
            "name": "Ann",
            "email": "a@b.com",
            "password": "secret",
            "passwordConfirmation": "secret",
        });

        let (status, json) = post_signup(sut, &body.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({ "name": "ServerError", "message": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn http_malformed_body_is_rejected_before_the_gate() {
        let Sut {
            sut,
            email_validator,
            ..
        } = default_sut();

        let (status, json) = post_signup(sut, "not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid JSON");
        assert!(email_validator.calls.lock().unwrap().is_empty());
    }
}
