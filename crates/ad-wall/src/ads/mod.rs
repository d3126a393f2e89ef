//! Sponsored ad wall: ranking, schema-driven editing, and the HTTP surface over both.

pub mod domain;
pub mod form;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{Ad, AdContent, AdDraft, AdField, AdId, FieldValue, PriceError, PriceInput};
pub use form::{
    validate, Control, FieldDescriptor, FieldErrors, FieldKind, FieldLayout, FieldPattern,
    FormConfig, FormConfigError, RuleKind, StepHint,
};
pub use repository::{AdRepository, ClickReceipt, RepositoryError};
pub use router::ad_router;
pub use scoring::{rank, score, RankedAd, ENGAGEMENT_WEIGHT};
pub use service::{AdService, AdServiceError};
pub use store::InMemoryAdStore;
