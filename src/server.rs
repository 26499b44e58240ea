use crate::constants::{INTERNAL_ERROR, NOT_FOUND};
use crate::req::Method::{DELETE, GET, POST, PUT};
use crate::req::Request;
use crate::wallet::controller::WalletController;
use crate::wallet::model::ErrorResponse;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot::Receiver;

pub struct Server {
    addr: String,
    wallet_ctrl: Arc<WalletController>,
}

impl Server {
    pub fn new(addr: impl Into<String>, wallet_ctrl: Arc<WalletController>) -> Self {
        Self {
            addr: addr.into(),
            wallet_ctrl,
        }
    }

    pub async fn start(&self, mut shutdown_rx: Receiver<()>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;
        tracing::info!("Server running on http://{}", self.addr);

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let Some((mut stream, peer)) = accepted(conn) else {
                        continue;
                    };

                    let wallet_ctrl = Arc::clone(&self.wallet_ctrl);

                    tokio::spawn(async move {
                        let (reader, writer) = stream.split();
                        if let Err(e) = Self::handle_client(reader, writer, &wallet_ctrl).await {
                            tracing::warn!(%peer, "Connection error: {:#}", e);
                        }
                    });
                }
                // Shutdown signal check
                _ = &mut shutdown_rx => {
                    tracing::info!("Shutting down server...");
                    break;
                }
            }
        }
        Ok(())
    }

    pub async fn handle_client<Reader, Writer>(
        reader: Reader,
        mut writer: Writer,
        wallet_ctrl: &WalletController,
    ) -> Result<()>
    where
        Reader: AsyncRead + Unpin,
        Writer: AsyncWrite + Unpin,
    {
        let (status_line, content) = match Request::new(reader).await {
            Ok(request) => {
                tracing::info!(method = ?request.method, path = %request.path, "request");
                Self::route(&request, wallet_ctrl).await
            }
            Err(e) => {
                tracing::info!("Failed to read request: {:#}", e);
                (INTERNAL_ERROR.to_string(), message_body(&format!("{:#}", e)))
            }
        };

        writer
            .write_all(
                format!(
                    "{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    content.len(),
                    content
                )
                .as_bytes(),
            )
            .await
            .context("Failed to write")?;
        writer.flush().await.context("Failed to flush")
    }

    async fn route(request: &Request, wallet_ctrl: &WalletController) -> (String, String) {
        match (&request.method, request.segments().as_slice()) {
            (GET, ["api", "v1", "wallets"]) => wallet_ctrl.list(request).await,
            (POST, ["api", "v1", "wallets"]) => wallet_ctrl.create(request).await,
            (PUT, ["api", "v1", "wallets"]) => wallet_ctrl.update(request).await,
            (GET, ["api", "v1", "users", id, "wallets"]) => wallet_ctrl.list_by_user(id).await,
            (DELETE, ["api", "v1", "users", id, "wallets"]) => {
                wallet_ctrl.delete_by_user(id).await
            }
            _ => (NOT_FOUND.to_string(), message_body("not found")),
        }
    }
}

// Accept failures such as EMFILE are per-connection; the listener stays up.
fn accepted<T>(conn: std::io::Result<T>) -> Option<T> {
    match conn {
        Ok(conn) => Some(conn),
        Err(e) => {
            tracing::warn!("Failed to accept connection: {}", e);
            None
        }
    }
}

fn message_body(message: &str) -> String {
    serde_json::to_string(&ErrorResponse::new(message))
        .unwrap_or_else(|_| String::from(r#"{"message":""}"#))
}
