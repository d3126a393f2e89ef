use std::sync::Arc;

use super::common::*;
use crate::ads::domain::{AdField, AdId, PriceInput};
use crate::ads::form::FormConfig;
use crate::ads::repository::{AdRepository, RepositoryError};
use crate::ads::service::{AdService, AdServiceError};

#[test]
fn create_normalizes_textual_price_and_starts_unclicked() {
    let (service, store) = build_service();

    let ad = service.create(draft()).expect("draft accepted");

    assert_eq!(ad.price, 88.5);
    assert_eq!(ad.clicked, 0);
    assert_eq!(store.fetch(ad.id).unwrap(), Some(ad));
}

#[test]
fn create_rejects_invalid_drafts_without_touching_the_store() {
    let (service, store) = build_service();
    let mut candidate = draft();
    candidate.title.clear();

    match service.create(candidate) {
        Err(AdServiceError::Invalid(errors)) => {
            assert_eq!(errors.get(AdField::Title), Some("广告标题不能为空"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(store.list().unwrap().len(), 3);
}

#[test]
fn unparsable_price_is_reported_on_the_price_field() {
    let (service, store) = build_service();
    let mut candidate = draft();
    candidate.price = Some(PriceInput::Text("abc".to_string()));

    match service.create(candidate) {
        Err(AdServiceError::Invalid(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(AdField::Price), Some("请输入有效的出价"));
        }
        other => panic!("expected price rejection, got {other:?}"),
    }
    assert_eq!(store.list().unwrap().len(), 3);
}

#[test]
fn negative_price_is_rejected() {
    let (service, _) = build_service();
    let mut candidate = draft();
    candidate.price = Some(PriceInput::Number(-5.0));

    assert!(matches!(
        service.create(candidate),
        Err(AdServiceError::Invalid(_))
    ));
}

#[test]
fn update_replaces_attributes_and_keeps_engagement() {
    let (service, _) = build_service();
    let mut candidate = draft();
    candidate.price = Some(PriceInput::Number(1.0));

    let updated = service.update(AdId(2), candidate).expect("update succeeds");

    assert_eq!(updated.id, AdId(2));
    assert_eq!(updated.clicked, 100);
    assert_eq!(updated.title, "秋季新品");
    assert_eq!(updated.price, 1.0);
}

#[test]
fn update_of_missing_ad_is_not_found() {
    let (service, _) = build_service();

    assert!(matches!(
        service.update(AdId(404), draft()),
        Err(AdServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn ranking_follows_clicks_and_edits() {
    let (service, _) = build_service();
    let initial: Vec<u64> = service
        .ranked()
        .unwrap()
        .iter()
        .map(|entry| entry.ad.id.0)
        .collect();
    assert_eq!(initial, vec![1, 2, 3]);

    let mut candidate = draft();
    candidate.price = Some(PriceInput::Number(10_000.0));
    service.update(AdId(3), candidate).expect("update succeeds");

    let after: Vec<u64> = service
        .ranked()
        .unwrap()
        .iter()
        .map(|entry| entry.ad.id.0)
        .collect();
    assert_eq!(after[0], 3);
}

#[test]
fn record_click_returns_new_count() {
    let (service, _) = build_service();

    let receipt = service.record_click(AdId(3)).expect("click recorded");

    assert_eq!(receipt.id, AdId(3));
    assert_eq!(receipt.clicked, 4);
    assert!(matches!(
        service.record_click(AdId(99)),
        Err(AdServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn copy_draft_drops_identity_and_engagement() {
    let (service, _) = build_service();

    let copy = service.copy_draft(AdId(1)).expect("source exists");
    let created = service.create(copy).expect("copy is a valid draft");

    assert_ne!(created.id, AdId(1));
    assert_eq!(created.title, "我是标题1");
    assert_eq!(created.clicked, 0);
}

#[test]
fn copy_of_seed_with_placeholder_url_fails_the_landing_pattern() {
    let (service, _) = build_service();
    let mut copy = service.copy_draft(AdId(2)).expect("source exists");
    copy.landing_url = "#".to_string();

    match service.create(copy) {
        Err(AdServiceError::Invalid(errors)) => {
            assert_eq!(errors.get(AdField::LandingUrl), Some("请输入有效的落地页"));
        }
        other => panic!("expected landing url rejection, got {other:?}"),
    }
}

#[test]
fn delete_removes_the_ad() {
    let (service, store) = build_service();

    service.delete(AdId(1)).expect("delete succeeds");

    assert!(store.fetch(AdId(1)).unwrap().is_none());
    assert!(matches!(
        service.get(AdId(1)),
        Err(AdServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn repository_outages_propagate() {
    let service = AdService::new(Arc::new(UnavailableRepository), FormConfig::standard());

    assert!(matches!(
        service.ranked(),
        Err(AdServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        service.create(draft()),
        Err(AdServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}
