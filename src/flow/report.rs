//! Brigade report flow: brigade → date → well/site, then a repeatable
//! 8-step operation sub-dialog. Same one-field-per-message shape as the
//! application flow; report numbering is assigned by the store.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::localization::{t_args_lang, t_lang};
use crate::model::{Operation, Report};
use crate::timefmt;

use super::{callback, Action, Reply};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStep {
    Brigade,
    Date,
    Site,
}

/// Header fields of a report under construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDraft {
    pub step: ReportStep,
    pub brigade: Option<String>,
    pub date: Option<NaiveDate>,
    pub site: Option<String>,
}

/// Completed report header, ready for the store to number it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub brigade: String,
    pub date: NaiveDate,
    pub site: String,
}

/// Outcome of one report-header message.
#[derive(Debug, Clone)]
pub enum ReportProgress {
    /// Next (or repeated) prompt.
    Prompt(Reply),
    /// All header fields collected; the caller appends this to the store.
    Complete(NewReport),
}

pub fn start_report(lang: Option<&str>) -> (ReportDraft, Reply) {
    let draft = ReportDraft {
        step: ReportStep::Brigade,
        brigade: None,
        date: None,
        site: None,
    };
    (draft, Reply::text(t_lang("report-prompt-brigade", lang)))
}

pub fn submit_report_field(
    draft: &mut ReportDraft,
    input: &str,
    lang: Option<&str>,
) -> ReportProgress {
    let trimmed = input.trim();

    match draft.step {
        ReportStep::Brigade => {
            if trimmed.is_empty() {
                return ReportProgress::Prompt(empty_retry("report-prompt-brigade", lang));
            }
            draft.brigade = Some(trimmed.to_string());
            draft.step = ReportStep::Date;
            ReportProgress::Prompt(Reply::text(t_args_lang(
                "report-prompt-date",
                &[("format", timefmt::DATE_HINT)],
                lang,
            )))
        }
        ReportStep::Date => match timefmt::parse_date(trimmed) {
            Ok(date) => {
                draft.date = Some(date);
                draft.step = ReportStep::Site;
                ReportProgress::Prompt(Reply::text(t_lang("report-prompt-site", lang)))
            }
            Err(err) => ReportProgress::Prompt(Reply::text(format!(
                "{}\n\n{}",
                t_args_lang(
                    "error-bad-date",
                    &[("input", err.input.as_str()), ("format", timefmt::DATE_HINT)],
                    lang
                ),
                t_args_lang("report-prompt-date", &[("format", timefmt::DATE_HINT)], lang)
            ))),
        },
        ReportStep::Site => {
            if trimmed.is_empty() {
                return ReportProgress::Prompt(empty_retry("report-prompt-site", lang));
            }
            draft.site = Some(trimmed.to_string());
            ReportProgress::Complete(NewReport {
                brigade: draft.brigade.clone().expect("brigade precedes site"),
                date: draft.date.expect("date precedes site"),
                site: trimmed.to_string(),
            })
        }
    }
}

/// Confirmation screen for a freshly numbered report, offering the
/// operation sub-dialog or finishing up.
pub fn report_created_reply(report: &Report, lang: Option<&str>) -> Reply {
    let text = format!(
        "{}\n\n{}",
        t_args_lang(
            "report-created",
            &[
                ("number", report.number.to_string().as_str()),
                ("id", report.id.to_string().as_str()),
                ("brigade", report.brigade.as_str()),
            ],
            lang,
        ),
        t_lang("report-next", lang)
    );
    Reply::with_actions(text, report_menu_actions(lang))
}

pub fn report_menu_actions(lang: Option<&str>) -> Vec<Action> {
    vec![
        Action::new(
            t_lang("action-add-operation", lang),
            callback::REPORT_ADD_OPERATION,
        ),
        Action::new(t_lang("action-finish-report", lang), callback::REPORT_FINISH),
    ]
}

/// Steps of the operation sub-dialog, one field per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpStep {
    Date,
    StartTime,
    EndTime,
    Name,
    RequestNumber,
    Equipment,
    Representative,
    Materials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDraft {
    pub step: OpStep,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub name: Option<String>,
    pub request_number: Option<String>,
    pub equipment: Option<String>,
    pub representative: Option<String>,
}

/// Outcome of one operation sub-dialog message.
#[derive(Debug, Clone)]
pub enum OperationProgress {
    Prompt(Reply),
    /// All eight fields collected; the caller appends this to the report.
    Complete(Operation),
}

pub fn start_operation(lang: Option<&str>) -> (OperationDraft, Reply) {
    let draft = OperationDraft {
        step: OpStep::Date,
        date: None,
        start_time: None,
        end_time: None,
        name: None,
        request_number: None,
        equipment: None,
        representative: None,
    };
    let reply = Reply::text(t_args_lang(
        "op-prompt-date",
        &[("format", timefmt::DATE_HINT)],
        lang,
    ));
    (draft, reply)
}

pub fn submit_operation_field(
    draft: &mut OperationDraft,
    input: &str,
    lang: Option<&str>,
) -> OperationProgress {
    let trimmed = input.trim();

    match draft.step {
        OpStep::Date => match timefmt::parse_date(trimmed) {
            Ok(date) => {
                draft.date = Some(date);
                draft.step = OpStep::StartTime;
                OperationProgress::Prompt(time_prompt("op-prompt-start", lang))
            }
            Err(err) => OperationProgress::Prompt(Reply::text(format!(
                "{}\n\n{}",
                t_args_lang(
                    "error-bad-date",
                    &[("input", err.input.as_str()), ("format", timefmt::DATE_HINT)],
                    lang
                ),
                t_args_lang("op-prompt-date", &[("format", timefmt::DATE_HINT)], lang)
            ))),
        },
        OpStep::StartTime => match timefmt::parse_time(trimmed) {
            Ok(time) => {
                draft.start_time = Some(time);
                draft.step = OpStep::EndTime;
                OperationProgress::Prompt(time_prompt("op-prompt-end", lang))
            }
            Err(err) => OperationProgress::Prompt(bad_time_retry(&err.input, "op-prompt-start", lang)),
        },
        OpStep::EndTime => match timefmt::parse_time(trimmed) {
            Ok(time) => {
                draft.end_time = Some(time);
                draft.step = OpStep::Name;
                OperationProgress::Prompt(Reply::text(t_lang("op-prompt-name", lang)))
            }
            Err(err) => OperationProgress::Prompt(bad_time_retry(&err.input, "op-prompt-end", lang)),
        },
        OpStep::Name => text_step(draft, trimmed, lang, "op-prompt-name", |draft, value| {
            draft.name = Some(value);
            draft.step = OpStep::RequestNumber;
            OperationProgress::Prompt(Reply::text(t_lang("op-prompt-request-number", lang)))
        }),
        OpStep::RequestNumber => {
            text_step(draft, trimmed, lang, "op-prompt-request-number", |draft, value| {
                draft.request_number = Some(value);
                draft.step = OpStep::Equipment;
                OperationProgress::Prompt(Reply::text(t_lang("op-prompt-equipment", lang)))
            })
        }
        OpStep::Equipment => text_step(draft, trimmed, lang, "op-prompt-equipment", |draft, value| {
            draft.equipment = Some(value);
            draft.step = OpStep::Representative;
            OperationProgress::Prompt(Reply::text(t_lang("op-prompt-representative", lang)))
        }),
        OpStep::Representative => {
            text_step(draft, trimmed, lang, "op-prompt-representative", |draft, value| {
                draft.representative = Some(value);
                draft.step = OpStep::Materials;
                OperationProgress::Prompt(Reply::text(t_lang("op-prompt-materials", lang)))
            })
        }
        OpStep::Materials => {
            if trimmed.is_empty() {
                return OperationProgress::Prompt(empty_retry("op-prompt-materials", lang));
            }
            OperationProgress::Complete(Operation {
                date: draft.date.expect("date precedes materials"),
                start_time: draft.start_time.expect("start time precedes materials"),
                end_time: draft.end_time.expect("end time precedes materials"),
                name: draft.name.clone().expect("name precedes materials"),
                request_number: draft
                    .request_number
                    .clone()
                    .expect("request number precedes materials"),
                equipment: draft.equipment.clone().expect("equipment precedes materials"),
                representative: draft
                    .representative
                    .clone()
                    .expect("representative precedes materials"),
                materials: trimmed.to_string(),
            })
        }
    }
}

/// Post-append acknowledgement, offering another operation or finishing.
pub fn operation_recorded_reply(report: &Report, lang: Option<&str>) -> Reply {
    let text = t_args_lang(
        "op-recorded",
        &[("number", report.number.to_string().as_str())],
        lang,
    );
    Reply::with_actions(text, report_menu_actions(lang))
}

fn text_step(
    draft: &mut OperationDraft,
    trimmed: &str,
    lang: Option<&str>,
    prompt_key: &str,
    advance: impl FnOnce(&mut OperationDraft, String) -> OperationProgress,
) -> OperationProgress {
    if trimmed.is_empty() {
        OperationProgress::Prompt(empty_retry(prompt_key, lang))
    } else {
        advance(draft, trimmed.to_string())
    }
}

fn time_prompt(key: &str, lang: Option<&str>) -> Reply {
    Reply::text(t_args_lang(key, &[("format", timefmt::TIME_HINT)], lang))
}

fn bad_time_retry(input: &str, prompt_key: &str, lang: Option<&str>) -> Reply {
    Reply::text(format!(
        "{}\n\n{}",
        t_args_lang(
            "error-bad-time",
            &[("input", input), ("format", timefmt::TIME_HINT)],
            lang
        ),
        t_args_lang(prompt_key, &[("format", timefmt::TIME_HINT)], lang)
    ))
}

fn empty_retry(prompt_key: &str, lang: Option<&str>) -> Reply {
    Reply::text(format!(
        "{}\n\n{}",
        t_lang("error-empty-input", lang),
        t_lang(prompt_key, lang)
    ))
}
