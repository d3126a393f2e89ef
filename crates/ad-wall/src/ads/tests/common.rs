use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::ads::domain::{Ad, AdContent, AdDraft, AdId, PriceInput};
use crate::ads::form::FormConfig;
use crate::ads::repository::{AdRepository, ClickReceipt, RepositoryError};
use crate::ads::service::AdService;
use crate::ads::store::InMemoryAdStore;
use crate::ads::ad_router;

pub(super) fn seeded_ad(id: u64, title: &str, price: f64, clicked: u64) -> Ad {
    let mut ad = Ad::new(
        AdId(id),
        AdContent {
            title: title.to_string(),
            publisher: "淘宝联盟".to_string(),
            content: "这里是广告文案内容。".to_string(),
            landing_url: format!("https://ads.example.com/{id}"),
            price,
        },
    );
    ad.clicked = clicked;
    ad
}

/// The three listings the wall starts with.
pub(super) fn seed_ads() -> Vec<Ad> {
    vec![
        seeded_ad(1, "我是标题1", 123.0, 123),
        seeded_ad(2, "广告标题2", 100.0, 100),
        seeded_ad(3, "广告标题3", 3.0, 3),
    ]
}

pub(super) fn draft() -> AdDraft {
    AdDraft {
        title: "秋季新品".to_string(),
        publisher: "极客时间".to_string(),
        content: "限时优惠，点击了解更多。".to_string(),
        landing_url: "https://example.com/promo".to_string(),
        price: Some(PriceInput::Text("88.5".to_string())),
    }
}

pub(super) fn build_service() -> (AdService<InMemoryAdStore>, Arc<InMemoryAdStore>) {
    let store = Arc::new(InMemoryAdStore::with_ads(seed_ads()));
    let service = AdService::new(store.clone(), FormConfig::standard());
    (service, store)
}

pub(super) fn router_with_seed() -> axum::Router {
    let (service, _) = build_service();
    ad_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl AdRepository for UnavailableRepository {
    fn list(&self) -> Result<Vec<Ad>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: AdId) -> Result<Option<Ad>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _content: AdContent) -> Result<Ad, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace(&self, _id: AdId, _content: AdContent) -> Result<Ad, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: AdId) -> Result<Ad, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_click(&self, _id: AdId) -> Result<ClickReceipt, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
