//! # Field Operations Request Bot
//!
//! A Telegram bot for submitting equipment/service applications against a
//! fixed catalog of request types with submission and confirmation lead-time
//! rules, and for keeping per-brigade field-work reports with an operations
//! log. Conversations are one field per message; lead-time rules are
//! advisory and never reject a submission.

pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod flow;
pub mod handlers;
pub mod localization;
pub mod model;
pub mod notify;
pub mod storage;
pub mod timefmt;
