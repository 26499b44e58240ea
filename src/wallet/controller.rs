use super::service::WalletService;
use crate::req::Request;

pub struct WalletController {
    service: WalletService,
}

impl WalletController {
    pub fn new(service: WalletService) -> Self {
        WalletController { service }
    }

    pub async fn list(&self, request: &Request) -> (String, String) {
        self.service
            .list_wallets(request.query_param("wallet_type"))
            .await
    }

    pub async fn list_by_user(&self, id: &str) -> (String, String) {
        self.service.list_wallets_by_user(id).await
    }

    pub async fn create(&self, request: &Request) -> (String, String) {
        self.service.create_wallet(&request.body).await
    }

    pub async fn update(&self, request: &Request) -> (String, String) {
        self.service.update_wallet(&request.body).await
    }

    pub async fn delete_by_user(&self, id: &str) -> (String, String) {
        self.service.delete_wallets_by_user(id).await
    }
}
