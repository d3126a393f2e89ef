use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::domain::{Ad, AdContent, AdId};
use super::repository::{AdRepository, ClickReceipt, RepositoryError};

/// Single-writer in-memory store. Every operation holds the lock for its whole mutation.
#[derive(Debug, Default)]
pub struct InMemoryAdStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    ads: Vec<Ad>,
    last_id: u64,
}

impl StoreState {
    /// Wall-clock millisecond ids, bumped so they never repeat or go backwards.
    fn next_id(&mut self) -> AdId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        AdId(id)
    }

    fn position(&self, id: AdId) -> Option<usize> {
        self.ads.iter().position(|ad| ad.id == id)
    }
}

impl InMemoryAdStore {
    /// Seeds the store with existing ads, keeping their ids and engagement.
    pub fn with_ads(ads: Vec<Ad>) -> Self {
        let last_id = ads.iter().map(|ad| ad.id.0).max().unwrap_or_default();
        Self {
            state: Mutex::new(StoreState { ads, last_id }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("ad store lock poisoned".to_string()))
    }
}

impl AdRepository for InMemoryAdStore {
    fn list(&self) -> Result<Vec<Ad>, RepositoryError> {
        Ok(self.lock()?.ads.clone())
    }

    fn fetch(&self, id: AdId) -> Result<Option<Ad>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.ads.iter().find(|ad| ad.id == id).cloned())
    }

    fn insert(&self, content: AdContent) -> Result<Ad, RepositoryError> {
        let mut guard = self.lock()?;
        let ad = Ad::new(guard.next_id(), content);
        guard.ads.push(ad.clone());
        Ok(ad)
    }

    fn replace(&self, id: AdId, content: AdContent) -> Result<Ad, RepositoryError> {
        let mut guard = self.lock()?;
        let index = guard.position(id).ok_or(RepositoryError::NotFound)?;
        let ad = &mut guard.ads[index];
        ad.apply(content);
        Ok(ad.clone())
    }

    fn delete(&self, id: AdId) -> Result<Ad, RepositoryError> {
        let mut guard = self.lock()?;
        let index = guard.position(id).ok_or(RepositoryError::NotFound)?;
        Ok(guard.ads.remove(index))
    }

    fn record_click(&self, id: AdId) -> Result<ClickReceipt, RepositoryError> {
        let mut guard = self.lock()?;
        let index = guard.position(id).ok_or(RepositoryError::NotFound)?;
        let ad = &mut guard.ads[index];
        ad.clicked = ad.clicked.saturating_add(1);
        Ok(ClickReceipt {
            id: ad.id,
            clicked: ad.clicked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str) -> AdContent {
        AdContent {
            title: title.to_string(),
            publisher: "阿里云".to_string(),
            content: "简洁的广告内容。".to_string(),
            landing_url: "https://example.com".to_string(),
            price: 10.0,
        }
    }

    #[test]
    fn insert_assigns_increasing_ids_with_zero_clicks() {
        let store = InMemoryAdStore::default();

        let first = store.insert(content("a")).unwrap();
        let second = store.insert(content("b")).unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.clicked, 0);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn ids_never_collide_with_seeded_records() {
        let far_future = AdId(u64::MAX / 2);
        let mut seeded = Ad::new(far_future, content("seed"));
        seeded.clicked = 4;
        let store = InMemoryAdStore::with_ads(vec![seeded]);

        let created = store.insert(content("new")).unwrap();

        assert_eq!(created.id, AdId(far_future.0 + 1));
    }

    #[test]
    fn replace_keeps_clicks_and_reports_missing_ids() {
        let store = InMemoryAdStore::default();
        let ad = store.insert(content("a")).unwrap();
        store.record_click(ad.id).unwrap();

        let replaced = store.replace(ad.id, content("renamed")).unwrap();

        assert_eq!(replaced.title, "renamed");
        assert_eq!(replaced.clicked, 1);
        assert!(matches!(
            store.replace(AdId(1), content("ghost")),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn delete_removes_by_identity() {
        let store = InMemoryAdStore::default();
        let keep = store.insert(content("keep")).unwrap();
        let drop = store.insert(content("drop")).unwrap();

        let removed = store.delete(drop.id).unwrap();

        assert_eq!(removed.id, drop.id);
        assert_eq!(store.list().unwrap(), vec![keep]);
        assert!(matches!(store.delete(drop.id), Err(RepositoryError::NotFound)));
    }

    #[test]
    fn clicks_are_monotonic() {
        let store = InMemoryAdStore::default();
        let ad = store.insert(content("a")).unwrap();

        let counts: Vec<u64> = (0..3)
            .map(|_| store.record_click(ad.id).unwrap().clicked)
            .collect();

        assert_eq!(counts, vec![1, 2, 3]);
        assert_eq!(store.fetch(ad.id).unwrap().unwrap().clicked, 3);
    }
}
