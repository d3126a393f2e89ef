use serde::{Deserialize, Serialize};

use super::domain::{Ad, AdContent, AdId};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations are the only writers of `clicked`.
pub trait AdRepository: Send + Sync {
    /// All ads in storage order.
    fn list(&self) -> Result<Vec<Ad>, RepositoryError>;
    fn fetch(&self, id: AdId) -> Result<Option<Ad>, RepositoryError>;
    /// Persists a new ad with zero engagement and an assigned id.
    fn insert(&self, content: AdContent) -> Result<Ad, RepositoryError>;
    /// Replaces the editable attributes of an existing ad.
    fn replace(&self, id: AdId, content: AdContent) -> Result<Ad, RepositoryError>;
    fn delete(&self, id: AdId) -> Result<Ad, RepositoryError>;
    /// Records one engagement event and returns the new count.
    fn record_click(&self, id: AdId) -> Result<ClickReceipt, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Ad not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Engagement count after a click was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickReceipt {
    pub id: AdId,
    pub clicked: u64,
}
