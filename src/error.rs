use std::{error::Error, fmt::Debug};

#[derive(thiserror::Error)]
pub enum CustomError {
    #[error("ENV '{0}' Not Found")]
    EnvError(String, #[source] std::env::VarError),

    #[error("ENV '{0}' has an invalid value '{1}'")]
    InvalidEnv(String, String),

    #[error("{0}")]
    DBError(#[source] sqlx::Error),

    #[error("wallet not found")]
    WalletNotFound,

    #[error("Wallet type is incorrect!")]
    InvalidWalletType,
}

impl Debug for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}
