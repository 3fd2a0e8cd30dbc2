use crate::{
    abstract_trait::account::{CreateAccountServiceTrait, DynAccountCommandRepository},
    domain::requests::{CreateAccountRequest, InsertAccountRequest},
    model::account::Account,
};
use anyhow::Result;
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynEncrypter,
    errors::ServiceError,
    utils::{Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{debug, error, info};

pub struct CreateAccountServiceDeps {
    pub hashing: DynEncrypter,
    pub command: DynAccountCommandRepository,
}

/// Hashes the password, then hands the account to the repository.
///
/// Performs no validation and no recovery: whatever the encrypter or the repository
/// returns as an error is handed back to the caller.
#[derive(Clone)]
pub struct CreateAccountService {
    hashing: DynEncrypter,
    command: DynAccountCommandRepository,
    metrics: Metrics,
}

impl CreateAccountService {
    pub fn new(deps: CreateAccountServiceDeps, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();

        let CreateAccountServiceDeps { hashing, command } = deps;

        metrics.register(registry, "create_account_service", "CreateAccountService");

        Ok(Self {
            hashing,
            command,
            metrics,
        })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("create-account-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing_success(&self, tracing_ctx: &TracingContext, message: &str) {
        self.complete_tracing_internal(tracing_ctx, true, message);
    }

    fn complete_tracing_error(&self, tracing_ctx: &TracingContext, error_message: &str) {
        self.complete_tracing_internal(tracing_ctx, false, error_message);
    }

    fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

/// Span attributes for `create`. Request data stays out of exported spans.
fn span_attributes() -> Vec<KeyValue> {
    vec![
        KeyValue::new("component", "account"),
        KeyValue::new("operation", "create"),
    ]
}

#[async_trait]
impl CreateAccountServiceTrait for CreateAccountService {
    async fn create(&self, req: &CreateAccountRequest) -> Result<Account, ServiceError> {
        debug!("📝 [SIGNUP] Creating account | Email: {}", req.email);

        let tracing_ctx = self.start_tracing("CreateAccount", span_attributes());

        let password_hash = match self.hashing.encrypt(&req.password).await {
            Ok(hash) => hash,
            Err(e) => {
                error!("❌ Failed to hash password: {e}");
                self.complete_tracing_error(&tracing_ctx, "Failed to hash password");
                return Err(e);
            }
        };

        let new_account = InsertAccountRequest {
            name: req.name.clone(),
            email: req.email.clone(),
            password_hash,
        };

        match self.command.create_account(&new_account).await {
            Ok(account) => {
                self.complete_tracing_success(&tracing_ctx, "Account created successfully");
                Ok(account)
            }
            Err(e) => {
                error!("❌ Failed to store account: {e}");
                self.complete_tracing_error(&tracing_ctx, "Failed to store account");
                Err(ServiceError::Repo(e))
            }
        }
    }
}
