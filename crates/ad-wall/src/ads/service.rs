use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Ad, AdContent, AdDraft, AdField, AdId};
use super::form::{self, FieldErrors, FieldLayout, FormConfig};
use super::repository::{AdRepository, ClickReceipt, RepositoryError};
use super::scoring::{self, RankedAd};

/// Service composing the form schema, the validation engine, and the ad repository.
pub struct AdService<R> {
    repository: Arc<R>,
    form: Arc<FormConfig>,
}

impl<R> AdService<R>
where
    R: AdRepository + 'static,
{
    pub fn new(repository: Arc<R>, form: FormConfig) -> Self {
        Self {
            repository,
            form: Arc::new(form),
        }
    }

    pub fn form_config(&self) -> &FormConfig {
        &self.form
    }

    pub fn form_layout(&self) -> Vec<FieldLayout> {
        self.form.layout()
    }

    /// Ads in storage order.
    pub fn list(&self) -> Result<Vec<Ad>, AdServiceError> {
        Ok(self.repository.list()?)
    }

    /// Fresh ranking over the current snapshot; nothing is cached between calls.
    pub fn ranked(&self) -> Result<Vec<RankedAd>, AdServiceError> {
        let ads = self.repository.list()?;
        Ok(scoring::rank(&ads))
    }

    pub fn get(&self, id: AdId) -> Result<Ad, AdServiceError> {
        let ad = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(ad)
    }

    /// Copy mode: the source ad's attributes without its identity or engagement.
    pub fn copy_draft(&self, id: AdId) -> Result<AdDraft, AdServiceError> {
        Ok(self.get(id)?.to_draft())
    }

    /// Dry-run of the submission gate.
    pub fn validate(&self, draft: &AdDraft) -> FieldErrors {
        form::validate(&self.form, draft)
    }

    pub fn create(&self, draft: AdDraft) -> Result<Ad, AdServiceError> {
        let content = self.accept(&draft)?;
        let ad = self.repository.insert(content)?;
        info!(ad_id = %ad.id, price = ad.price, "ad created");
        Ok(ad)
    }

    pub fn update(&self, id: AdId, draft: AdDraft) -> Result<Ad, AdServiceError> {
        let content = self.accept(&draft)?;
        let ad = self.repository.replace(id, content)?;
        info!(ad_id = %ad.id, price = ad.price, "ad updated");
        Ok(ad)
    }

    pub fn delete(&self, id: AdId) -> Result<Ad, AdServiceError> {
        let ad = self.repository.delete(id)?;
        info!(ad_id = %ad.id, "ad deleted");
        Ok(ad)
    }

    pub fn record_click(&self, id: AdId) -> Result<ClickReceipt, AdServiceError> {
        let receipt = self.repository.record_click(id)?;
        debug!(ad_id = %receipt.id, clicked = receipt.clicked, "click recorded");
        Ok(receipt)
    }

    /// Validation gate followed by the one-way price normalization.
    fn accept(&self, draft: &AdDraft) -> Result<AdContent, AdServiceError> {
        let mut errors = self.validate(draft);
        if !errors.is_empty() {
            debug!(%errors, "ad draft rejected");
            return Err(AdServiceError::Invalid(errors));
        }

        draft.normalize().map_err(|err| {
            let message = match self.form.field(AdField::Price) {
                Some(field) => form::invalid_message(field),
                None => err.to_string(),
            };
            errors.record(AdField::Price, message);
            debug!(%err, "ad draft price rejected");
            AdServiceError::Invalid(errors)
        })
    }
}

/// Error raised by the ad service.
#[derive(Debug, thiserror::Error)]
pub enum AdServiceError {
    #[error("ad draft failed validation: {0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
