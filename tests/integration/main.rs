//! Integration test binary -- all integration tests consolidated into a single
//! binary.

// Allow unwrap/expect in test code
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

mod agenda_store_workflow;
mod occurrence_calendar;
mod reminder_form_workflow;
