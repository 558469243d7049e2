// UI layer: one linear pass over the roster using `dialoguer` prompts.
// Fetch, pick a user, enter the new values, write, exit. The prompt-free
// steps (`select`, `save`, `done_message`) are split out so they can be
// driven without a terminal.

use crate::api::UserStore;
use crate::error::InputError;
use crate::model::{PresenceStatus, UserRecord};
use crate::users::{self, StatusUpdate};
use anyhow::{Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::warn;

/// Placeholder shown when a user has no custom status.
const NO_VALUE: &str = "-";

/// Run the interactive status editor against `store`.
pub fn run(store: &impl UserStore) -> Result<()> {
    let loading = spinner("Loading users...")?;
    let report = users::fetch_all(store);
    loading.finish_and_clear();
    let report = report.context("Failed to fetch users")?;

    // No selection can be valid against an empty roster; stop before asking.
    if report.users.is_empty() {
        println!("No users in the database.");
        return Ok(());
    }

    println!("Users in the database:");
    for line in roster_lines(&report.users) {
        println!("{line}");
    }

    let answer: String = Input::new()
        .with_prompt("Whose status should change (number)?")
        .allow_empty(true)
        .interact_text()?;
    let user = select(&report.users, &answer)?;

    println!(
        "New status ({}), Enter to keep '{}':",
        PresenceStatus::hint(),
        user.status
    );
    let status: String = Input::new().with_prompt(">").allow_empty(true).interact_text()?;

    println!("New custom status (empty to clear):");
    let custom: String = Input::new().with_prompt(">").allow_empty(true).interact_text()?;

    let saving = spinner("Saving...")?;
    let updated = save(store, user, &status, &custom);
    saving.finish_and_clear();
    let updated = updated?;

    println!("{}", done_message(&updated));
    Ok(())
}

/// One numbered line per user, starting at 1.
pub fn roster_lines(users: &[UserRecord]) -> Vec<String> {
    users
        .iter()
        .enumerate()
        .map(|(i, u)| {
            format!(
                "{}. {} (@{}) - {} / {}",
                i + 1,
                u.name,
                u.username,
                u.status,
                // an empty custom status prints as the placeholder too
                u.custom_status.as_deref().filter(|c| !c.is_empty()).unwrap_or(NO_VALUE)
            )
        })
        .collect()
}

/// Pick the user named by a 1-based answer.
pub fn select<'a>(users: &'a [UserRecord], answer: &str) -> Result<&'a UserRecord, InputError> {
    Ok(&users[parse_selection(answer, users.len())?])
}

/// Turn a 1-based answer into an index into a roster of `len` users.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, InputError> {
    let trimmed = input.trim();
    let selected: usize = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if selected == 0 || selected > len {
        return Err(InputError::OutOfRange { selected, len });
    }
    Ok(selected - 1)
}

/// Write the typed answers for `user` and return the record as stored.
///
/// Blank status keeps the current one; blank custom status clears it.
pub fn save(
    store: &impl UserStore,
    user: &UserRecord,
    status: &str,
    custom_status: &str,
) -> Result<UserRecord> {
    let update = StatusUpdate {
        status: optional_text(status),
        custom_status: optional_text(custom_status),
    };
    let written = users::update(store, user, update)
        .with_context(|| format!("Failed to update {}", user.name))?;
    let updated = UserRecord::from(written);
    if updated.presence().is_none() {
        warn!(status = %updated.status, "status is not one the app knows; written anyway");
    }
    Ok(updated)
}

/// Closing line: what the app will now show for the user.
pub fn done_message(updated: &UserRecord) -> String {
    format!(
        "Done: {} now shows '{}' ({}). Refresh the NetPulse app to see the change.",
        updated.name,
        updated.display_status(),
        updated.status
    )
}

/// Trimmed text, or `None` when nothing was typed.
pub fn optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
