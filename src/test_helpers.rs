use crate::config::AppConfig;
use crate::qr::QrSettings;
use rocket::local::asynchronous::Client;

pub(crate) async fn client() -> Client {
    TestClientBuilder::new().build().await
}

pub(crate) struct TestClientBuilder {
    config: AppConfig,
}

impl TestClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub(crate) fn qr_settings(mut self, qr: QrSettings) -> Self {
        self.config.qr = qr;
        self
    }

    pub(crate) async fn build(self) -> Client {
        Client::tracked(crate::rocket(self.config))
            .await
            .expect("valid client")
    }
}
