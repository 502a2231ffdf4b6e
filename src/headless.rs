// Headless mode: drive a scripted account session without a terminal UI
//
// Runs the same App wiring the TUI uses, but feeds it a fixed sequence of
// user actions and logs every step to stdout. Useful for smoke-testing the
// account service and for watching the controllers interact.
//
// Run with: account-panel --no-tui

use crate::config::Config;
use crate::dropdown::MenuItem;
use crate::events::Outcome;
use crate::logging::LogBuffer;
use crate::loyalty::{format_points, LoyaltyAccount};
use crate::profile::ProfileField;
use crate::service::AccountHandle;
use crate::tui::app::App;
use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Longest we wait for the service to answer one command
const OUTCOME_TIMEOUT: Duration = Duration::from_secs(10);

/// One scripted user action
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    EnterEditMode,
    Type(ProfileField, String),
    /// Submit and wait for the service to answer
    Submit,
    /// Submit expecting the form to reject it locally
    SubmitInvalid,
    Logout,
}

/// Rename the user, trip validation once, then sign out
fn session_script(username: &str) -> Vec<Step> {
    vec![
        Step::EnterEditMode,
        Step::Type(ProfileField::Username, format!("{}_updated", username)),
        Step::Submit,
        Step::EnterEditMode,
        Step::Type(ProfileField::Email, "not-an-email".to_string()),
        Step::SubmitInvalid,
        Step::Logout,
    ]
}

async fn next_outcome(outcomes: &mut mpsc::Receiver<Outcome>) -> Result<Outcome> {
    timeout(OUTCOME_TIMEOUT, outcomes.recv())
        .await
        .context("Timed out waiting for the account service")?
        .ok_or_else(|| anyhow!("Account service stopped"))
}

fn log_account(account: &LoyaltyAccount) {
    let standing = &account.standing;
    tracing::info!(
        "Loyalty: {} points ({} earned), tier {}",
        format_points(account.current_points),
        format_points(account.total_earned),
        standing.tier
    );
    tracing::info!(
        "{}: {} ({})",
        standing.heading(),
        standing.progress_label(),
        standing.points_needed_label()
    );
    for tx in &account.transactions {
        tracing::info!(
            "  {} {:<28} {:<8} {:>7}",
            tx.date_label(),
            tx.description,
            tx.kind.label(),
            tx.points_label()
        );
    }
}

/// Run the scripted session to completion
pub async fn run_headless(
    handle: AccountHandle,
    account: LoyaltyAccount,
    config: &Config,
) -> Result<()> {
    let AccountHandle {
        commands,
        mut outcomes,
        mut identity,
    } = handle;

    let current = identity.borrow_and_update().clone();
    let username = current
        .as_ref()
        .map(|i| i.username.clone())
        .unwrap_or_default();

    log_account(&account);

    let mut app = App::new(
        current,
        account,
        LogBuffer::new(),
        commands,
        config.toast_duration,
    );
    tracing::info!("Session start on {}", app.route().path());

    for step in session_script(&username) {
        tracing::debug!("Step: {:?}", step);
        match step {
            Step::EnterEditMode => app.profile.enter_edit_mode(),
            Step::Type(field, value) => {
                app.profile.focus(field);
                app.profile.on_field_change(field, value);
            }
            Step::Submit => {
                app.submit_profile();
                if !app.profile.is_pending() {
                    continue;
                }
                let outcome = next_outcome(&mut outcomes).await?;
                let succeeded = outcome.is_success();
                app.on_outcome(outcome);

                if succeeded && identity.has_changed().unwrap_or(false) {
                    let next = identity.borrow_and_update().clone();
                    app.on_identity_changed(next);
                }
            }
            Step::SubmitInvalid => {
                app.submit_profile();
                if app.profile.is_pending() {
                    return Err(anyhow!("Invalid form was submitted"));
                }
            }
            Step::Logout => {
                app.dropdown.toggle();
                app.select_menu_item(MenuItem::Logout);
                let outcome = next_outcome(&mut outcomes).await?;
                app.on_outcome(outcome);
            }
        }
    }

    tracing::info!(
        "Session end on {} ({} notifications)",
        app.route().path(),
        app.notifications.surfaced_count()
    );
    Ok(())
}
