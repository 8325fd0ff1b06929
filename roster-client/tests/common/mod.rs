// Test harness: mock services on ephemeral ports
#![allow(dead_code)]

use roster_client::{ClientConfig, DurableStore, RecordService, WizardTiming};
use roster_mock::{MockState, basic_info_router, details_router};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct Services {
    pub basic: Arc<MockState>,
    pub details: Arc<MockState>,
    pub basic_url: String,
    pub details_url: String,
}

async fn spawn(router: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A port that was free a moment ago; connecting to it is refused
pub async fn down_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

impl Services {
    /// Both services up
    pub async fn start() -> Self {
        let basic = MockState::new();
        let details = MockState::new();
        let basic_url = spawn(basic_info_router(basic.clone())).await;
        let details_url = spawn(details_router(details.clone())).await;
        Self {
            basic,
            details,
            basic_url,
            details_url,
        }
    }

    /// Basic info up, details down
    pub async fn details_down() -> Self {
        let mut services = Self::start().await;
        services.details_url = down_url().await;
        services
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.basic_url, &self.details_url)
            .with_timeout(2_000)
            .with_timing(WizardTiming::instant())
    }

    pub fn client(&self) -> (RecordService, DurableStore) {
        let store = DurableStore::in_memory().unwrap();
        let service = RecordService::new(&self.config(), store.clone()).unwrap();
        (service, store)
    }
}

/// Both services down
pub async fn offline_client() -> (RecordService, DurableStore) {
    let config = ClientConfig::new(down_url().await, down_url().await)
        .with_timeout(2_000)
        .with_timing(WizardTiming::instant());
    let store = DurableStore::in_memory().unwrap();
    let service = RecordService::new(&config, store.clone()).unwrap();
    (service, store)
}
