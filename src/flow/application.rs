//! Application submission flow: type selection → field collection →
//! lead-time validation → review → optional transfers → confirm/cancel.
//!
//! The functions here are pure with respect to the transport: they take the
//! draft and the user's text, mutate the draft, and return a [`Reply`]. The
//! current time is always passed in so lead-time checks are testable.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, LeadTime, RequestType};
use crate::errors::FlowError;
use crate::localization::{t_args_lang, t_lang};
use crate::model::FinalizedApplication;
use crate::timefmt;

use super::{callback, Action, Reply};

/// Position in the field-collection sequence. Collection order follows the
/// application record: location, brigade, execution time, description,
/// address, then review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppStep {
    Location,
    Brigade,
    ExecutionTime,
    Description,
    Address,
    Review,
}

/// Transfer tiers permitted per request type, each usable at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferTier {
    First,
    Second,
}

impl TransferTier {
    pub fn index(self) -> u8 {
        match self {
            TransferTier::First => 1,
            TransferTier::Second => 2,
        }
    }
}

/// Mutable per-chat application draft. Created on type selection, discarded
/// on confirmation or cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub type_id: String,
    pub step: AppStep,
    pub location: Option<String>,
    pub brigade: Option<String>,
    pub execution_at: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub address: Option<String>,
    /// Advisory notice produced by lead-time validation, repeated in review.
    pub lead_time_notice: Option<String>,
    pub transfer_first_used: bool,
    pub transfer_second_used: bool,
    pub transfer_count: u8,
}

impl ApplicationDraft {
    fn new(type_id: String) -> Self {
        Self {
            type_id,
            step: AppStep::Location,
            location: None,
            brigade: None,
            execution_at: None,
            description: None,
            address: None,
            lead_time_notice: None,
            transfer_first_used: false,
            transfer_second_used: false,
            transfer_count: 0,
        }
    }

    pub fn transfer_used(&self, tier: TransferTier) -> bool {
        match tier {
            TransferTier::First => self.transfer_first_used,
            TransferTier::Second => self.transfer_second_used,
        }
    }
}

/// Result of feeding one text message into the field-collection machine.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub reply: Reply,
    /// False when the entered time did not parse and the prompt repeats.
    pub applied: bool,
}

/// Start a new application for the given catalog id.
///
/// Fails with [`FlowError::UnknownType`] when the id is not in the catalog;
/// otherwise returns the fresh draft and the first field prompt.
pub fn start(
    catalog: &Catalog,
    type_id: &str,
    lang: Option<&str>,
) -> Result<(ApplicationDraft, Reply), FlowError> {
    let ty = catalog
        .lookup(type_id)
        .map_err(|_| FlowError::UnknownType(type_id.to_string()))?;

    let draft = ApplicationDraft::new(ty.id.clone());
    let text = format!(
        "{}\n\n{}",
        describe_type(ty, lang),
        t_lang("prompt-location", lang)
    );
    Ok((draft, Reply::text(text)))
}

/// Feed one user message into the draft at its current step.
///
/// Invalid input (empty text, unparseable timestamp) re-prompts the same
/// step; it never advances and never fails the turn.
pub fn submit_field(
    catalog: &Catalog,
    draft: &mut ApplicationDraft,
    input: &str,
    now: NaiveDateTime,
    lang: Option<&str>,
) -> Reply {
    let ty = match catalog.lookup(&draft.type_id) {
        Ok(ty) => ty,
        // The type was validated at session start; a missing id here means
        // the catalog changed under a live session.
        Err(_) => return Reply::text(t_lang("no-active-session", lang)),
    };

    let trimmed = input.trim();

    match draft.step {
        AppStep::Location => match non_empty(trimmed) {
            Some(value) => {
                draft.location = Some(value);
                draft.step = AppStep::Brigade;
                Reply::text(t_lang("prompt-brigade", lang))
            }
            None => empty_retry("prompt-location", lang),
        },
        AppStep::Brigade => match non_empty(trimmed) {
            Some(value) => {
                draft.brigade = Some(value);
                draft.step = AppStep::ExecutionTime;
                Reply::text(execution_time_prompt(lang))
            }
            None => empty_retry("prompt-brigade", lang),
        },
        AppStep::ExecutionTime => match timefmt::parse_datetime(trimmed) {
            Ok(execution_at) => {
                draft.execution_at = Some(execution_at);
                draft.lead_time_notice = submission_notice(ty, execution_at, now, lang);
                draft.step = AppStep::Description;
                let prompt = t_lang("prompt-description", lang);
                let text = match &draft.lead_time_notice {
                    Some(notice) => format!("{notice}\n\n{prompt}"),
                    None => prompt,
                };
                Reply::text(text)
            }
            Err(err) => Reply::text(format!(
                "{}\n\n{}",
                t_args_lang(
                    "error-bad-datetime",
                    &[("input", err.input.as_str()), ("format", timefmt::DATETIME_HINT)],
                    lang
                ),
                execution_time_prompt(lang)
            )),
        },
        AppStep::Description => match non_empty(trimmed) {
            Some(value) => {
                draft.description = Some(value);
                draft.step = AppStep::Address;
                Reply::text(t_lang("prompt-address", lang))
            }
            None => empty_retry("prompt-description", lang),
        },
        AppStep::Address => match non_empty(trimmed) {
            Some(value) => {
                draft.address = Some(value);
                draft.step = AppStep::Review;
                review_reply(ty, draft, lang)
            }
            None => empty_retry("prompt-address", lang),
        },
        // Stray text while reviewing: show the review screen again with a
        // hint about the accepted commands.
        AppStep::Review => {
            let mut reply = review_reply(ty, draft, lang);
            reply.text = format!("{}\n\n{}", t_lang("review-help", lang), reply.text);
            reply
        }
    }
}

/// Advisory lead-time check run when the execution time is entered.
///
/// Numeric rules warn when the time falls inside the required window;
/// freeform rules are echoed verbatim. Neither blocks the flow.
pub fn submission_notice(
    ty: &RequestType,
    execution_at: NaiveDateTime,
    now: NaiveDateTime,
    lang: Option<&str>,
) -> Option<String> {
    match &ty.submission {
        LeadTime::Hours(hours) => {
            if timefmt::is_late(execution_at, now, *hours) {
                Some(t_args_lang(
                    "warning-late-submission",
                    &[("hours", hours.to_string().as_str())],
                    lang,
                ))
            } else {
                None
            }
        }
        LeadTime::Rule(rule) => Some(t_args_lang(
            "notice-submission-rule",
            &[("rule", rule.as_str())],
            lang,
        )),
    }
}

/// The review screen: field summary plus confirm/cancel and any available
/// transfer tiers.
pub fn review_reply(ty: &RequestType, draft: &ApplicationDraft, lang: Option<&str>) -> Reply {
    let mut lines = Vec::new();
    lines.push(t_lang("review-title", lang));
    lines.push(String::new());
    lines.push(format!("{}: {}", t_lang("label-type", lang), ty.name));
    if let Some(location) = &draft.location {
        lines.push(format!("{}: {}", t_lang("label-location", lang), location));
    }
    if let Some(brigade) = &draft.brigade {
        lines.push(format!("{}: {}", t_lang("label-brigade", lang), brigade));
    }
    if let Some(execution_at) = draft.execution_at {
        lines.push(format!(
            "{}: {}",
            t_lang("label-execution-time", lang),
            timefmt::format_datetime(execution_at)
        ));
    }
    if let Some(description) = &draft.description {
        lines.push(format!(
            "{}: {}",
            t_lang("label-description", lang),
            description
        ));
    }
    if let Some(address) = &draft.address {
        lines.push(format!("{}: {}", t_lang("label-address", lang), address));
    }
    lines.push(format!(
        "{}: {}",
        t_lang("label-confirmation", lang),
        lead_time_display(&ty.confirmation, lang)
    ));
    if let Some(note) = &ty.transfer_note {
        lines.push(format!("{}: {}", t_lang("label-transfer-note", lang), note));
    }
    if let Some(notice) = &draft.lead_time_notice {
        lines.push(String::new());
        lines.push(notice.clone());
    }
    lines.push(String::new());
    lines.push(t_lang("review-instructions", lang));

    let mut actions = Vec::new();
    if ty.transfer_allowed(1) && !draft.transfer_first_used {
        actions.push(Action::new(
            t_lang("action-transfer-first", lang),
            callback::TRANSFER_FIRST,
        ));
    }
    if ty.transfer_allowed(2) && !draft.transfer_second_used {
        actions.push(Action::new(
            t_lang("action-transfer-second", lang),
            callback::TRANSFER_SECOND,
        ));
    }
    actions.push(Action::new(t_lang("action-confirm", lang), callback::CONFIRM));
    actions.push(Action::new(t_lang("action-cancel", lang), callback::CANCEL));

    Reply::with_actions(lines.join("\n"), actions)
}

/// Guard and prompt for a transfer request from the review screen.
///
/// Fails with [`FlowError::TransferUnavailable`] when the type forbids the
/// tier or it was already used this session.
pub fn begin_transfer(
    ty: &RequestType,
    draft: &ApplicationDraft,
    tier: TransferTier,
    lang: Option<&str>,
) -> Result<Reply, FlowError> {
    if !ty.transfer_allowed(tier.index()) || draft.transfer_used(tier) {
        return Err(FlowError::TransferUnavailable(tier.index()));
    }

    let mut text = t_args_lang("transfer-prompt", &[("format", timefmt::DATETIME_HINT)], lang);
    if let Some(note) = &ty.transfer_note {
        text = format!(
            "{}: {}\n\n{}",
            t_lang("label-transfer-note", lang),
            note,
            text
        );
    }
    Ok(Reply::text(text))
}

/// Apply the newly entered execution time for a pending transfer.
///
/// The stored time is overwritten without re-validating the original
/// submission window; the tier is marked used and review is re-entered.
pub fn apply_transfer(
    ty: &RequestType,
    draft: &mut ApplicationDraft,
    tier: TransferTier,
    input: &str,
    lang: Option<&str>,
) -> TransferOutcome {
    match timefmt::parse_datetime(input) {
        Ok(execution_at) => {
            draft.execution_at = Some(execution_at);
            match tier {
                TransferTier::First => draft.transfer_first_used = true,
                TransferTier::Second => draft.transfer_second_used = true,
            }
            draft.transfer_count += 1;

            let mut reply = review_reply(ty, draft, lang);
            reply.text = format!("{}\n\n{}", t_lang("transfer-applied", lang), reply.text);
            TransferOutcome {
                reply,
                applied: true,
            }
        }
        Err(err) => TransferOutcome {
            reply: Reply::text(format!(
                "{}\n\n{}",
                t_args_lang(
                    "error-bad-datetime",
                    &[("input", err.input.as_str()), ("format", timefmt::DATETIME_HINT)],
                    lang
                ),
                t_args_lang("transfer-prompt", &[("format", timefmt::DATETIME_HINT)], lang)
            )),
            applied: false,
        },
    }
}

/// Snapshot of a reviewed draft, ready for the store to assign an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub type_id: String,
    pub type_name: String,
    pub location: String,
    pub brigade: String,
    pub execution_at: NaiveDateTime,
    pub description: String,
    pub address: String,
    pub transfer_count: u8,
    pub lead_time_notice: Option<String>,
    pub submitted_by: i64,
    pub created_at: NaiveDateTime,
}

impl NewApplication {
    pub fn into_finalized(self, id: u64) -> FinalizedApplication {
        FinalizedApplication {
            id,
            type_id: self.type_id,
            type_name: self.type_name,
            location: self.location,
            brigade: self.brigade,
            execution_at: self.execution_at,
            description: self.description,
            address: self.address,
            transfer_count: self.transfer_count,
            lead_time_notice: self.lead_time_notice,
            submitted_by: self.submitted_by,
            created_at: self.created_at,
        }
    }
}

/// Assemble the final record from a fully reviewed draft.
///
/// Returns `None` when mandatory fields are missing, which cannot happen for
/// a draft that reached [`AppStep::Review`] through [`submit_field`].
pub fn finalize(
    ty: &RequestType,
    draft: &ApplicationDraft,
    submitted_by: i64,
    now: NaiveDateTime,
) -> Option<NewApplication> {
    Some(NewApplication {
        type_id: draft.type_id.clone(),
        type_name: ty.name.clone(),
        location: draft.location.clone()?,
        brigade: draft.brigade.clone()?,
        execution_at: draft.execution_at?,
        description: draft.description.clone()?,
        address: draft.address.clone()?,
        transfer_count: draft.transfer_count,
        lead_time_notice: draft.lead_time_notice.clone(),
        submitted_by,
        created_at: now,
    })
}

/// One catalog entry rendered for the selection screen and the full listing.
pub fn describe_type(ty: &RequestType, lang: Option<&str>) -> String {
    let mut lines = vec![format!("{}. {}", ty.id, ty.name)];
    lines.push(format!(
        "{}: {}",
        t_lang("label-submission", lang),
        lead_time_display(&ty.submission, lang)
    ));
    lines.push(format!(
        "{}: {}",
        t_lang("label-confirmation", lang),
        lead_time_display(&ty.confirmation, lang)
    ));

    let transfers = match (ty.transfer_first_allowed, ty.transfer_second_allowed) {
        (true, true) => t_lang("transfers-two", lang),
        (true, false) | (false, true) => t_lang("transfers-one", lang),
        (false, false) => t_lang("transfers-none", lang),
    };
    lines.push(format!("{}: {}", t_lang("label-transfers", lang), transfers));

    if let Some(note) = &ty.transfer_note {
        lines.push(format!("{}: {}", t_lang("label-transfer-note", lang), note));
    }
    if let Some(note) = &ty.note {
        lines.push(format!("{}: {}", t_lang("label-note", lang), note));
    }
    lines.join("\n")
}

fn lead_time_display(lead_time: &LeadTime, lang: Option<&str>) -> String {
    match lead_time {
        LeadTime::Hours(hours) => t_args_lang(
            "lead-hours",
            &[("hours", hours.to_string().as_str())],
            lang,
        ),
        LeadTime::Rule(rule) => rule.clone(),
    }
}

fn execution_time_prompt(lang: Option<&str>) -> String {
    t_args_lang(
        "prompt-execution-time",
        &[("format", timefmt::DATETIME_HINT)],
        lang,
    )
}

fn empty_retry(prompt_key: &str, lang: Option<&str>) -> Reply {
    Reply::text(format!(
        "{}\n\n{}",
        t_lang("error-empty-input", lang),
        t_lang(prompt_key, lang)
    ))
}

fn non_empty(trimmed: &str) -> Option<String> {
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::callback;
    use crate::localization::init_localization;
    use chrono::Duration;

    const LANG: Option<&str> = Some("en");

    fn setup() -> Catalog {
        init_localization().expect("localization init");
        Catalog::embedded().expect("embedded catalog")
    }

    fn now() -> NaiveDateTime {
        timefmt::parse_datetime("01.06.2024 12:00").unwrap()
    }

    fn drive_to_review(catalog: &Catalog, type_id: &str, execution: &str) -> ApplicationDraft {
        let (mut draft, _) = start(catalog, type_id, LANG).unwrap();
        submit_field(catalog, &mut draft, "Well-12", now(), LANG);
        submit_field(catalog, &mut draft, "7", now(), LANG);
        submit_field(catalog, &mut draft, execution, now(), LANG);
        submit_field(catalog, &mut draft, "Lifting works", now(), LANG);
        submit_field(catalog, &mut draft, "Pad 3, access road", now(), LANG);
        assert_eq!(draft.step, AppStep::Review);
        draft
    }

    #[test]
    fn test_start_unknown_type_fails() {
        let catalog = setup();
        let err = start(&catalog, "99", LANG).unwrap_err();
        assert_eq!(err, FlowError::UnknownType("99".to_string()));
    }

    #[test]
    fn test_start_prompts_for_location() {
        let catalog = setup();
        let (draft, reply) = start(&catalog, "5", LANG).unwrap();
        assert_eq!(draft.step, AppStep::Location);
        assert!(reply.text.contains("На кран"));
        assert!(reply.text.contains("field and well"));
    }

    #[test]
    fn test_fields_collected_in_order() {
        let catalog = setup();
        let draft = drive_to_review(&catalog, "5", "10.06.2024 08:00");
        assert_eq!(draft.location.as_deref(), Some("Well-12"));
        assert_eq!(draft.brigade.as_deref(), Some("7"));
        assert_eq!(draft.description.as_deref(), Some("Lifting works"));
        assert_eq!(draft.address.as_deref(), Some("Pad 3, access road"));
        assert!(draft.execution_at.is_some());
    }

    #[test]
    fn test_bad_timestamp_reprompts_same_step() {
        let catalog = setup();
        let (mut draft, _) = start(&catalog, "5", LANG).unwrap();
        submit_field(&catalog, &mut draft, "Well-12", now(), LANG);
        submit_field(&catalog, &mut draft, "7", now(), LANG);

        let reply = submit_field(&catalog, &mut draft, "next tuesday", now(), LANG);
        assert_eq!(draft.step, AppStep::ExecutionTime);
        assert!(draft.execution_at.is_none());
        assert!(reply.text.contains("next tuesday"));
        assert!(reply.text.contains(timefmt::DATETIME_HINT));

        // A correct retry advances normally.
        submit_field(&catalog, &mut draft, "10.06.2024 08:00", now(), LANG);
        assert_eq!(draft.step, AppStep::Description);
    }

    #[test]
    fn test_empty_field_reprompts() {
        let catalog = setup();
        let (mut draft, _) = start(&catalog, "5", LANG).unwrap();
        let reply = submit_field(&catalog, &mut draft, "   ", now(), LANG);
        assert_eq!(draft.step, AppStep::Location);
        assert!(reply.text.contains("must not be empty"));
    }

    #[test]
    fn test_late_submission_warns_but_advances() {
        let catalog = setup();
        let (mut draft, _) = start(&catalog, "5", LANG).unwrap();
        submit_field(&catalog, &mut draft, "Well-12", now(), LANG);
        submit_field(&catalog, &mut draft, "7", now(), LANG);

        // 10 minutes ahead against a 24-hour submission window.
        let soon = now() + Duration::minutes(10);
        let reply = submit_field(
            &catalog,
            &mut draft,
            &timefmt::format_datetime(soon),
            now(),
            LANG,
        );
        assert_eq!(draft.step, AppStep::Description);
        assert!(reply.text.contains("less than 24 hours"));
        assert!(draft.lead_time_notice.is_some());
    }

    #[test]
    fn test_on_time_submission_has_no_notice() {
        let catalog = setup();
        let draft = drive_to_review(&catalog, "5", "10.06.2024 08:00");
        assert!(draft.lead_time_notice.is_none());
    }

    #[test]
    fn test_freeform_rule_echoed_verbatim() {
        let catalog = setup();
        let (mut draft, _) = start(&catalog, "6", LANG).unwrap();
        submit_field(&catalog, &mut draft, "Well-12", now(), LANG);
        submit_field(&catalog, &mut draft, "7", now(), LANG);
        let reply = submit_field(&catalog, &mut draft, "01.06.2024 12:30", now(), LANG);
        // Freeform rules are displayed, never compared numerically.
        assert!(reply.text.contains("до 15:00 предыдущего рабочего дня"));
        assert_eq!(draft.step, AppStep::Description);
    }

    #[test]
    fn test_late_notice_repeated_in_review_summary() {
        let catalog = setup();
        let soon = now() + Duration::minutes(10);
        let draft = drive_to_review(&catalog, "5", &timefmt::format_datetime(soon));
        let ty = catalog.lookup("5").unwrap();
        let reply = review_reply(ty, &draft, LANG);
        assert!(reply.text.contains("less than 24 hours"));
    }

    #[test]
    fn test_review_offers_available_transfer_tiers() {
        let catalog = setup();
        let draft = drive_to_review(&catalog, "5", "10.06.2024 08:00");
        let ty = catalog.lookup("5").unwrap();
        let reply = review_reply(ty, &draft, LANG);
        let data = reply.action_data();
        assert!(data.contains(&callback::TRANSFER_FIRST));
        assert!(data.contains(&callback::TRANSFER_SECOND));
        assert!(data.contains(&callback::CONFIRM));
        assert!(data.contains(&callback::CANCEL));
    }

    #[test]
    fn test_review_hides_forbidden_transfer_tiers() {
        let catalog = setup();
        let draft = drive_to_review(&catalog, "1", "10.06.2024 08:00");
        let ty = catalog.lookup("1").unwrap();
        let reply = review_reply(ty, &draft, LANG);
        let data = reply.action_data();
        assert!(!data.contains(&callback::TRANSFER_FIRST));
        assert!(!data.contains(&callback::TRANSFER_SECOND));
        assert!(data.contains(&callback::CONFIRM));
    }

    #[test]
    fn test_transfer_tier_usable_once() {
        let catalog = setup();
        let mut draft = drive_to_review(&catalog, "5", "10.06.2024 08:00");
        let ty = catalog.lookup("5").unwrap();

        assert!(begin_transfer(ty, &draft, TransferTier::First, LANG).is_ok());
        let outcome = apply_transfer(ty, &mut draft, TransferTier::First, "11.06.2024 08:00", LANG);
        assert!(outcome.applied);
        assert_eq!(draft.transfer_count, 1);
        assert_eq!(
            draft.execution_at,
            Some(timefmt::parse_datetime("11.06.2024 08:00").unwrap())
        );

        // Same tier again is rejected; the second tier is still open.
        let err = begin_transfer(ty, &draft, TransferTier::First, LANG).unwrap_err();
        assert_eq!(err, FlowError::TransferUnavailable(1));
        assert!(begin_transfer(ty, &draft, TransferTier::Second, LANG).is_ok());
    }

    #[test]
    fn test_transfer_forbidden_tier_rejected() {
        let catalog = setup();
        let draft = drive_to_review(&catalog, "3", "10.06.2024 08:00");
        let ty = catalog.lookup("3").unwrap();
        // Type 3 permits tier 1 only.
        assert!(begin_transfer(ty, &draft, TransferTier::First, LANG).is_ok());
        let err = begin_transfer(ty, &draft, TransferTier::Second, LANG).unwrap_err();
        assert_eq!(err, FlowError::TransferUnavailable(2));
    }

    #[test]
    fn test_transfer_bad_time_retries_without_applying() {
        let catalog = setup();
        let mut draft = drive_to_review(&catalog, "5", "10.06.2024 08:00");
        let ty = catalog.lookup("5").unwrap();
        let before = draft.execution_at;

        let outcome = apply_transfer(ty, &mut draft, TransferTier::First, "soon", LANG);
        assert!(!outcome.applied);
        assert_eq!(draft.execution_at, before);
        assert!(!draft.transfer_first_used);
        assert!(outcome.reply.text.contains(timefmt::DATETIME_HINT));
    }

    #[test]
    fn test_transfer_skips_submission_window_revalidation() {
        let catalog = setup();
        let mut draft = drive_to_review(&catalog, "5", "10.06.2024 08:00");
        let ty = catalog.lookup("5").unwrap();

        // Transfer to a time well inside the 24-hour window: accepted with a
        // transfer notice, no fresh late warning.
        let outcome = apply_transfer(ty, &mut draft, TransferTier::First, "01.06.2024 12:30", LANG);
        assert!(outcome.applied);
        assert!(outcome.reply.text.contains("transferred"));
        assert!(!outcome.reply.text.contains("less than 24 hours"));
    }

    #[test]
    fn test_finalize_snapshots_all_fields() {
        let catalog = setup();
        let draft = drive_to_review(&catalog, "5", "10.06.2024 08:00");
        let ty = catalog.lookup("5").unwrap();

        let record = finalize(ty, &draft, 4242, now()).unwrap();
        assert_eq!(record.type_id, "5");
        assert_eq!(record.type_name, "На кран");
        assert_eq!(record.location, "Well-12");
        assert_eq!(record.brigade, "7");
        assert_eq!(record.submitted_by, 4242);
        assert_eq!(record.transfer_count, 0);

        let finalized = record.into_finalized(17);
        assert_eq!(finalized.id, 17);
        assert_eq!(finalized.location, "Well-12");
    }

    #[test]
    fn test_finalize_rejects_incomplete_draft() {
        let catalog = setup();
        let (draft, _) = start(&catalog, "5", LANG).unwrap();
        let ty = catalog.lookup("5").unwrap();
        assert!(finalize(ty, &draft, 1, now()).is_none());
    }
}
