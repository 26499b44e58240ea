use std::sync::Arc;

use serde::Serialize;

use super::model::{ErrorResponse, NewWallet, UpdateWallet, WalletType};
use super::repo::WalletStore;
use crate::{
    constants::{
        BAD_REQUEST, CREATE_SUCCESS, CREATED_TEXT_RESPONSE, INTERNAL_ERROR, INVALID_CREATE_BODY,
        INVALID_UPDATE_BODY, NOT_FOUND, OK_RESPONSE, OK_TEXT_RESPONSE, UPDATE_SUCCESS,
    },
    error::CustomError,
    utils::{des_body_or_default, ser_to_str},
};

pub struct WalletService {
    store: Arc<dyn WalletStore>,
}

impl WalletService {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        WalletService { store }
    }

    pub async fn list_wallets(&self, wallet_type: Option<&str>) -> (String, String) {
        self.store.print_pool_stats();
        let result = match wallet_type.filter(|t| !t.is_empty()) {
            Some(wallet_type) => {
                tracing::debug!(wallet_type, "listing wallets by type");
                self.store.list_by_type(wallet_type).await
            }
            None => self.store.list_all().await,
        };
        match result {
            Ok(wallets) => json(OK_RESPONSE, &wallets),
            Err(err) => storage_failure("list wallets", err),
        }
    }

    pub async fn list_wallets_by_user(&self, id: &str) -> (String, String) {
        let user_id = match parse_id(id) {
            Ok(user_id) => user_id,
            Err(response) => return response,
        };
        match self.store.list_by_user(user_id).await {
            Ok(wallets) => json(OK_RESPONSE, &wallets),
            Err(err) => storage_failure("list wallets by user", err),
        }
    }

    pub async fn create_wallet(&self, request: &str) -> (String, String) {
        let wallet: NewWallet = match des_body_or_default(request) {
            Ok(wallet) => wallet,
            Err(err) => return parse_failure("create wallet body", err.to_string()),
        };
        if !wallet.is_complete() {
            return error(BAD_REQUEST, INVALID_CREATE_BODY);
        }
        let wallet_type = match WalletType::try_from(wallet.wallet_type.as_str()) {
            Ok(wallet_type) => wallet_type,
            Err(err) => {
                tracing::info!(wallet_type = %wallet.wallet_type, "rejected wallet type");
                return error(BAD_REQUEST, &err.to_string());
            }
        };

        match self
            .store
            .insert(
                wallet.user_id,
                &wallet.user_name,
                &wallet.wallet_name,
                wallet_type.as_str(),
                wallet.balance,
            )
            .await
        {
            Ok(()) => {
                tracing::info!(user_id = wallet.user_id, "wallet created");
                (CREATED_TEXT_RESPONSE.to_string(), CREATE_SUCCESS.to_string())
            }
            Err(err) => storage_failure("create wallet", err),
        }
    }

    /// The wallet type is taken as given here; only creation checks it
    /// against [`WalletType`].
    pub async fn update_wallet(&self, request: &str) -> (String, String) {
        let wallet: UpdateWallet = match des_body_or_default(request) {
            Ok(wallet) => wallet,
            Err(err) => return parse_failure("update wallet body", err.to_string()),
        };
        if !wallet.is_complete() {
            return error(BAD_REQUEST, INVALID_UPDATE_BODY);
        }

        match self
            .store
            .update(
                wallet.id,
                &wallet.wallet_name,
                &wallet.wallet_type,
                wallet.balance,
            )
            .await
        {
            Ok(rows) => {
                tracing::info!(id = wallet.id, rows, "update wallets total");
                (OK_TEXT_RESPONSE.to_string(), UPDATE_SUCCESS.to_string())
            }
            Err(err) => storage_failure("update wallet", err),
        }
    }

    pub async fn delete_wallets_by_user(&self, id: &str) -> (String, String) {
        let user_id = match parse_id(id) {
            Ok(user_id) => user_id,
            Err(response) => return response,
        };
        match self.store.delete_by_user(user_id).await {
            Ok(rows) => {
                tracing::info!(user_id, rows, "wallets deleted");
                json(OK_RESPONSE, &format!("total delete wallets {}", rows))
            }
            Err(err) => storage_failure("delete wallets", err),
        }
    }
}

fn parse_id(id: &str) -> Result<i32, (String, String)> {
    id.parse::<i32>()
        .map_err(|e| parse_failure("path id", e.to_string()))
}

fn json<T: Serialize>(status_line: &str, value: &T) -> (String, String) {
    match ser_to_str(value) {
        Ok(body) => (status_line.to_string(), body),
        Err(err) => {
            tracing::error!("serde error: {}", err);
            error(INTERNAL_ERROR, &err.to_string())
        }
    }
}

fn error(status_line: &str, message: &str) -> (String, String) {
    let body = serde_json::to_string(&ErrorResponse::new(message))
        .unwrap_or_else(|_| String::from(r#"{"message":""}"#));
    (status_line.to_string(), body)
}

// Malformed input is reported as a server error, same as the storage path.
fn parse_failure(what: &str, message: String) -> (String, String) {
    tracing::info!("failed to parse {}: {}", what, message);
    error(INTERNAL_ERROR, &message)
}

fn storage_failure(operation: &str, err: CustomError) -> (String, String) {
    match err {
        CustomError::WalletNotFound => {
            tracing::info!("{}: {}", operation, err);
            error(NOT_FOUND, &err.to_string())
        }
        err => {
            tracing::error!("{} failed: {:?}", operation, err);
            error(INTERNAL_ERROR, &err.to_string())
        }
    }
}
