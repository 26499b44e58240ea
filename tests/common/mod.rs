#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use wallet_api::{
    error::CustomError,
    wallet::{
        controller::WalletController, model::Wallet, repo::WalletStore, service::WalletService,
    },
};

/// In-memory stand-in for the `user_wallet` table.
#[derive(Default)]
pub struct MemoryStore {
    wallets: Mutex<Vec<Wallet>>,
}

impl MemoryStore {
    pub fn with_wallets(wallets: Vec<Wallet>) -> Self {
        MemoryStore {
            wallets: Mutex::new(wallets),
        }
    }

    pub fn snapshot(&self) -> Vec<Wallet> {
        self.wallets.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Wallet>, CustomError> {
        Ok(self.snapshot())
    }

    async fn list_by_type(&self, wallet_type: &str) -> Result<Vec<Wallet>, CustomError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|w| w.wallet_type == wallet_type)
            .collect())
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Wallet>, CustomError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|w| w.user_id == user_id)
            .collect())
    }

    async fn insert(
        &self,
        user_id: i32,
        user_name: &str,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<(), CustomError> {
        let mut wallets = self.wallets.lock().unwrap();
        let id = wallets.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        wallets.push(Wallet {
            id,
            user_id,
            user_name: user_name.to_string(),
            wallet_name: wallet_name.to_string(),
            wallet_type: wallet_type.to_string(),
            balance,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn update(
        &self,
        id: i32,
        wallet_name: &str,
        wallet_type: &str,
        balance: f64,
    ) -> Result<u64, CustomError> {
        let mut wallets = self.wallets.lock().unwrap();
        let mut rows = 0;
        for wallet in wallets.iter_mut().filter(|w| w.id == id) {
            wallet.wallet_name = wallet_name.to_string();
            wallet.wallet_type = wallet_type.to_string();
            wallet.balance = balance;
            rows += 1;
        }
        if rows == 0 {
            return Err(CustomError::WalletNotFound);
        }
        Ok(rows)
    }

    async fn delete_by_user(&self, user_id: i32) -> Result<u64, CustomError> {
        let mut wallets = self.wallets.lock().unwrap();
        let before = wallets.len();
        wallets.retain(|w| w.user_id != user_id);
        let rows = (before - wallets.len()) as u64;
        if rows == 0 {
            return Err(CustomError::WalletNotFound);
        }
        Ok(rows)
    }

    fn print_pool_stats(&self) {}
}

/// Every call fails the way a dropped database connection would.
pub struct FailingStore;

pub const FAILURE_DETAIL: &str = "connection refused";

fn failure() -> CustomError {
    CustomError::DBError(sqlx::Error::Protocol(FAILURE_DETAIL.to_string()))
}

#[async_trait]
impl WalletStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Wallet>, CustomError> {
        Err(failure())
    }

    async fn list_by_type(&self, _wallet_type: &str) -> Result<Vec<Wallet>, CustomError> {
        Err(failure())
    }

    async fn list_by_user(&self, _user_id: i32) -> Result<Vec<Wallet>, CustomError> {
        Err(failure())
    }

    async fn insert(
        &self,
        _user_id: i32,
        _user_name: &str,
        _wallet_name: &str,
        _wallet_type: &str,
        _balance: f64,
    ) -> Result<(), CustomError> {
        Err(failure())
    }

    async fn update(
        &self,
        _id: i32,
        _wallet_name: &str,
        _wallet_type: &str,
        _balance: f64,
    ) -> Result<u64, CustomError> {
        Err(failure())
    }

    async fn delete_by_user(&self, _user_id: i32) -> Result<u64, CustomError> {
        Err(failure())
    }

    fn print_pool_stats(&self) {}
}

pub fn wallet(id: i32, user_id: i32, wallet_name: &str, wallet_type: &str) -> Wallet {
    Wallet {
        id,
        user_id,
        user_name: format!("user_{}", user_id),
        wallet_name: wallet_name.to_string(),
        wallet_type: wallet_type.to_string(),
        balance: 100.0,
        created_at: Utc::now(),
    }
}

pub fn controller(store: Arc<dyn WalletStore>) -> WalletController {
    WalletController::new(WalletService::new(store))
}

pub fn service(store: Arc<dyn WalletStore>) -> WalletService {
    WalletService::new(store)
}

#[cfg(feature = "test-sqlite")]
pub async fn setup_test_db() -> sqlx::SqlitePool {
    use rand::Rng;

    let suffix: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();
    let db_name = format!("test_{}", suffix);
    let database_url = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);

    let pool = sqlx::SqlitePool::connect(&database_url)
        .await
        .expect("Failed to create in-memory SQLite DB");

    sqlx::query(
        "
        CREATE TABLE user_wallet (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            user_name TEXT NOT NULL,
            wallet_name TEXT NOT NULL,
            wallet_type TEXT NOT NULL,
            balance REAL NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );
        ",
    )
    .execute(&pool)
    .await
    .expect("Failed to create test table");

    pool
}
