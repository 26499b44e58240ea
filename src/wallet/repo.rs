use async_trait::async_trait;

use crate::error::CustomError;

use super::model::Wallet;

/// Storage operations the wallet service depends on.
///
/// Every read returns full rows. Filtering happens in SQL. `update` and
/// `delete_by_user` report zero affected rows as [`CustomError::WalletNotFound`]
/// so callers can tell it apart from a failed query ([`CustomError::DBError`]).
#[async_trait]
pub trait WalletStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Wallet>, CustomError>;
    async fn list_by_type(&self, wallet_type: &str) -> Result<Vec<Wallet>, CustomError>;
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Wallet>, CustomError>;
    async fn insert(
        &self,
        user_id: i32,
        user_name: &str,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<(), CustomError>;
    async fn update(
        &self,
        id: i32,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<u64, CustomError>;
    async fn delete_by_user(&self, user_id: i32) -> Result<u64, CustomError>;
    fn print_pool_stats(&self);
}

fn affected(rows: u64) -> Result<u64, CustomError> {
    if rows == 0 {
        return Err(CustomError::WalletNotFound);
    }
    Ok(rows)
}

// `size` and `num_idle` are sampled separately and can disagree.
fn active_connections(size: u32, idle: usize) -> u32 {
    size.saturating_sub(u32::try_from(idle).unwrap_or(u32::MAX))
}

#[async_trait]
impl WalletStore for sqlx::PgPool {
    async fn list_all(&self) -> Result<Vec<Wallet>, CustomError> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, user_id, user_name, wallet_name, wallet_type, balance, created_at
            FROM user_wallet
            ORDER BY id
            "#,
        )
        .fetch_all(self)
        .await
        .map_err(CustomError::DBError)
    }

    async fn list_by_type(&self, wallet_type: &str) -> Result<Vec<Wallet>, CustomError> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, user_id, user_name, wallet_name, wallet_type, balance, created_at
            FROM user_wallet
            WHERE wallet_type = $1
            ORDER BY id
            "#,
        )
        .bind(wallet_type)
        .fetch_all(self)
        .await
        .map_err(CustomError::DBError)
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Wallet>, CustomError> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, user_id, user_name, wallet_name, wallet_type, balance, created_at
            FROM user_wallet
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self)
        .await
        .map_err(CustomError::DBError)
    }

    async fn insert(
        &self,
        user_id: i32,
        user_name: &str,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<(), CustomError> {
        sqlx::query(
            r#"
            INSERT INTO user_wallet (user_id, user_name, wallet_name, wallet_type, balance)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(user_name)
        .bind(wallet_name)
        .bind(wallet_type)
        .bind(balance)
        .execute(self)
        .await
        .map_err(CustomError::DBError)?;
        Ok(())
    }

    async fn update(
        &self,
        id: i32,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<u64, CustomError> {
        let result = sqlx::query(
            r#"
            UPDATE user_wallet
            SET wallet_name = $1, wallet_type = $2, balance = $3
            WHERE id = $4
            "#,
        )
        .bind(wallet_name)
        .bind(wallet_type)
        .bind(balance)
        .bind(id)
        .execute(self)
        .await
        .map_err(CustomError::DBError)?;
        affected(result.rows_affected())
    }

    async fn delete_by_user(&self, user_id: i32) -> Result<u64, CustomError> {
        let result = sqlx::query(r#"DELETE FROM user_wallet WHERE user_id = $1"#)
            .bind(user_id)
            .execute(self)
            .await
            .map_err(CustomError::DBError)?;
        affected(result.rows_affected())
    }

    fn print_pool_stats(&self) {
        tracing::debug!(
            total = self.size(),
            idle = self.num_idle(),
            active = active_connections(self.size(), self.num_idle()),
            "db pool stats"
        );
    }
}

#[cfg(feature = "test-sqlite")]
#[async_trait]
impl WalletStore for sqlx::SqlitePool {
    async fn list_all(&self) -> Result<Vec<Wallet>, CustomError> {
        sqlx::query_as::<_, Wallet>(
            r#"SELECT id, user_id, user_name, wallet_name, wallet_type, balance, created_at
            FROM user_wallet ORDER BY id"#,
        )
        .fetch_all(self)
        .await
        .map_err(CustomError::DBError)
    }

    async fn list_by_type(&self, wallet_type: &str) -> Result<Vec<Wallet>, CustomError> {
        sqlx::query_as::<_, Wallet>(
            r#"SELECT id, user_id, user_name, wallet_name, wallet_type, balance, created_at
            FROM user_wallet WHERE wallet_type = ?1 ORDER BY id"#,
        )
        .bind(wallet_type)
        .fetch_all(self)
        .await
        .map_err(CustomError::DBError)
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Wallet>, CustomError> {
        sqlx::query_as::<_, Wallet>(
            r#"SELECT id, user_id, user_name, wallet_name, wallet_type, balance, created_at
            FROM user_wallet WHERE user_id = ?1 ORDER BY id"#,
        )
        .bind(user_id)
        .fetch_all(self)
        .await
        .map_err(CustomError::DBError)
    }

    async fn insert(
        &self,
        user_id: i32,
        user_name: &str,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<(), CustomError> {
        sqlx::query(
            r#"INSERT INTO user_wallet (user_id, user_name, wallet_name, wallet_type, balance)
            VALUES (?1, ?2, ?3, ?4, ?5)"#,
        )
        .bind(user_id)
        .bind(user_name)
        .bind(wallet_name)
        .bind(wallet_type)
        .bind(balance)
        .execute(self)
        .await
        .map_err(CustomError::DBError)?;
        Ok(())
    }

    async fn update(
        &self,
        id: i32,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<u64, CustomError> {
        let result = sqlx::query(
            r#"UPDATE user_wallet SET wallet_name = ?1, wallet_type = ?2, balance = ?3
            WHERE id = ?4"#,
        )
        .bind(wallet_name)
        .bind(wallet_type)
        .bind(balance)
        .bind(id)
        .execute(self)
        .await
        .map_err(CustomError::DBError)?;
        affected(result.rows_affected())
    }

    async fn delete_by_user(&self, user_id: i32) -> Result<u64, CustomError> {
        let result = sqlx::query(r#"DELETE FROM user_wallet WHERE user_id = ?1"#)
            .bind(user_id)
            .execute(self)
            .await
            .map_err(CustomError::DBError)?;
        affected(result.rows_affected())
    }

    fn print_pool_stats(&self) {
        tracing::debug!(
            total = self.size(),
            idle = self.num_idle(),
            active = active_connections(self.size(), self.num_idle()),
            "db pool stats"
        );
    }
}
