use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CustomError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Wallet {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub wallet_name: String,
    pub wallet_type: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

/// Create payload. Missing or `null` fields fall back to zero values and are
/// rejected by validation, so `0` and `0.0` can never be stored.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct NewWallet {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub balance: f64,
}

impl NewWallet {
    pub fn is_complete(&self) -> bool {
        self.user_id != 0
            && !self.user_name.is_empty()
            && !self.wallet_name.is_empty()
            && !self.wallet_type.is_empty()
            && self.balance != 0.0
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct UpdateWallet {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub balance: f64,
}

impl UpdateWallet {
    pub fn is_complete(&self) -> bool {
        self.id != 0
            && !self.wallet_name.is_empty()
            && !self.wallet_type.is_empty()
            && self.balance != 0.0
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletType {
    Savings,
    CreditCard,
    CryptoWallet,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::Savings => "Savings",
            WalletType::CreditCard => "Credit Card",
            WalletType::CryptoWallet => "Crypto Wallet",
        }
    }
}

impl TryFrom<&str> for WalletType {
    type Error = CustomError;

    fn try_from(value: &str) -> Result<Self, CustomError> {
        match value {
            "Savings" => Ok(WalletType::Savings),
            "Credit Card" => Ok(WalletType::CreditCard),
            "Crypto Wallet" => Ok(WalletType::CryptoWallet),
            _ => Err(CustomError::InvalidWalletType),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
