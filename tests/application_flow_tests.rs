//! End-to-end application flow: type selection through confirmation,
//! driven through the flow functions and the storage collaborator the same
//! way the handlers drive them.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};

use fieldops_bot::catalog::Catalog;
use fieldops_bot::dialogue::DialogueState;
use fieldops_bot::errors::FlowError;
use fieldops_bot::flow::application::{
    self, AppStep, ApplicationDraft, TransferTier,
};
use fieldops_bot::flow::callback;
use fieldops_bot::localization::init_localization;
use fieldops_bot::storage::Storage;
use fieldops_bot::timefmt;

const LANG: Option<&str> = Some("en");

fn setup() -> Catalog {
    init_localization().expect("localization init");
    Catalog::embedded().expect("embedded catalog")
}

fn now() -> NaiveDateTime {
    timefmt::parse_datetime("01.06.2024 12:00").unwrap()
}

/// Walk a draft through all five field-collection steps.
fn collect_fields(
    catalog: &Catalog,
    draft: &mut ApplicationDraft,
    execution: &str,
) -> Vec<String> {
    ["Well-12", "7", execution, "Crane lift at the wellhead", "Pad 3, access road"]
        .iter()
        .map(|input| application::submit_field(catalog, draft, input, now(), LANG).text)
        .collect()
}

#[test]
fn test_unknown_type_selection_fails() {
    let catalog = setup();
    let err = application::start(&catalog, "77", LANG).unwrap_err();
    assert_eq!(err, FlowError::UnknownType("77".to_string()));
}

/// Full walkthrough: type 5 (crane, 24h submission, 12h
/// confirmation, both transfer tiers), execution 10 minutes from now.
#[tokio::test]
async fn test_late_application_reaches_review_and_confirms() -> Result<()> {
    let catalog = setup();
    let storage = Storage::memory();

    let (mut draft, reply) = application::start(&catalog, "5", LANG)?;
    assert!(reply.text.contains("На кран"));

    let soon = timefmt::format_datetime(now() + Duration::minutes(10));
    let replies = collect_fields(&catalog, &mut draft, &soon);

    // The late warning appears when the time is entered...
    assert!(replies[2].contains("less than 24 hours"));
    // ...and again in the review summary.
    assert_eq!(draft.step, AppStep::Review);
    let ty = catalog.lookup("5")?;
    let review = application::review_reply(ty, &draft, LANG);
    assert!(review.text.contains("less than 24 hours"));

    // Both transfer tiers are on offer.
    let data = review.action_data();
    assert!(data.contains(&callback::TRANSFER_FIRST));
    assert!(data.contains(&callback::TRANSFER_SECOND));

    // Advisory only: the late application confirms normally.
    let record = application::finalize(ty, &draft, 100, now()).expect("reviewed draft");
    let finalized = storage.append_application(record).await?;
    assert_eq!(finalized.id, 1);
    assert!(finalized.lead_time_notice.is_some());
    assert_eq!(finalized.location, "Well-12");
    assert_eq!(finalized.brigade, "7");

    Ok(())
}

#[tokio::test]
async fn test_confirm_clears_session() -> Result<()> {
    let catalog = setup();
    let storage = Storage::memory();

    let (mut draft, _) = application::start(&catalog, "5", LANG)?;
    collect_fields(&catalog, &mut draft, "10.06.2024 08:00");

    // Confirming from review works once...
    let state = DialogueState::Application { draft };
    let draft = state.into_reviewing()?;
    let ty = catalog.lookup("5")?;
    let record = application::finalize(ty, &draft, 100, now()).expect("reviewed draft");
    storage.append_application(record).await?;

    // ...after which the dialogue is reset and a second confirm is an
    // out-of-order event.
    let cleared = DialogueState::default();
    assert_eq!(cleared.into_reviewing().unwrap_err(), FlowError::NoActiveSession);

    Ok(())
}

#[test]
fn test_transfer_then_second_attempt_rejected() {
    let catalog = setup();
    let (mut draft, _) = application::start(&catalog, "5", LANG).unwrap();
    collect_fields(&catalog, &mut draft, "10.06.2024 08:00");
    let ty = catalog.lookup("5").unwrap();

    application::begin_transfer(ty, &draft, TransferTier::First, LANG).unwrap();
    let outcome =
        application::apply_transfer(ty, &mut draft, TransferTier::First, "12.06.2024 08:00", LANG);
    assert!(outcome.applied);

    // The review screen no longer offers the used tier.
    let review = application::review_reply(ty, &draft, LANG);
    let data = review.action_data();
    assert!(!data.contains(&callback::TRANSFER_FIRST));
    assert!(data.contains(&callback::TRANSFER_SECOND));

    let err = application::begin_transfer(ty, &draft, TransferTier::First, LANG).unwrap_err();
    assert_eq!(err, FlowError::TransferUnavailable(1));
}

#[test]
fn test_transferred_time_lands_in_final_record() {
    let catalog = setup();
    let (mut draft, _) = application::start(&catalog, "5", LANG).unwrap();
    collect_fields(&catalog, &mut draft, "10.06.2024 08:00");
    let ty = catalog.lookup("5").unwrap();

    application::apply_transfer(ty, &mut draft, TransferTier::First, "12.06.2024 08:00", LANG);
    application::apply_transfer(ty, &mut draft, TransferTier::Second, "13.06.2024 10:00", LANG);

    let record = application::finalize(ty, &draft, 100, now()).expect("reviewed draft");
    assert_eq!(record.transfer_count, 2);
    assert_eq!(
        record.execution_at,
        timefmt::parse_datetime("13.06.2024 10:00").unwrap()
    );
}

#[test]
fn test_mid_collection_state_is_not_reviewable() {
    let catalog = setup();
    let (mut draft, _) = application::start(&catalog, "5", LANG).unwrap();
    application::submit_field(&catalog, &mut draft, "Well-12", now(), LANG);

    let state = DialogueState::Application { draft };
    assert_eq!(state.into_reviewing().unwrap_err(), FlowError::NoActiveSession);
}
