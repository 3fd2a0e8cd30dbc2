use crate::{
    abstract_trait::account::AccountCommandRepositoryTrait,
    domain::requests::InsertAccountRequest, model::account::Account,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use uuid::Uuid;

pub struct AccountCommandRepository {
    db: ConnectionPool,
}

impl AccountCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::AlreadyExists("account with this email".into())
        }
        other => RepositoryError::from(other),
    }
}

#[async_trait]
impl AccountCommandRepositoryTrait for AccountCommandRepository {
    async fn create_account(
        &self,
        req: &InsertAccountRequest,
    ) -> Result<Account, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let id = Uuid::new_v4().to_string();

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (
                id,
                name,
                email,
                password_hash,
                created_at,
                updated_at
            )
            VALUES (
                $1, $2, $3, $4, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP
            )
            RETURNING
                id,
                name,
                email,
                password_hash
            "#,
        )
        .bind(&id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_insert_error)?;

        Ok(account)
    }
}
