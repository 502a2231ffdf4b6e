// Account service - the asynchronous request layer behind the panel
//
// Runs as its own tokio task. The UI sends Commands over an mpsc channel and
// receives one Outcome per command. The signed-in identity is published
// through a watch channel so the UI can re-seed the profile form.

use crate::config::AccountConfig;
use crate::events::{Command, Operation, Outcome, UpdateProfileRequest};
use crate::identity::UserIdentity;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

pub const PROFILE_UPDATED: &str = "Profile updated successfully";
pub const LOGGED_OUT: &str = "Logged out successfully";
pub const UPDATE_FAILED: &str = "Update failed";
pub const USERNAME_TAKEN: &str = "Username is already taken";
pub const NOT_SIGNED_IN: &str = "You are not signed in";

/// UI side of the account service channels
pub struct AccountHandle {
    pub commands: mpsc::Sender<Command>,
    pub outcomes: mpsc::Receiver<Outcome>,
    pub identity: watch::Receiver<Option<UserIdentity>>,
}

pub struct AccountService {
    identity: watch::Sender<Option<UserIdentity>>,
    outcomes: mpsc::Sender<Outcome>,
    latency: Duration,
    fail_updates: bool,
    reserved_usernames: Vec<String>,
}

impl AccountService {
    /// Spawn the service task and return the UI handle
    pub fn spawn(config: &AccountConfig) -> AccountHandle {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        let (identity_tx, identity_rx) = watch::channel(Some(UserIdentity::new(
            config.username.clone(),
            config.email.clone(),
        )));

        let service = Self {
            identity: identity_tx,
            outcomes: outcome_tx,
            latency: Duration::from_millis(config.latency_ms),
            fail_updates: config.fail_updates,
            reserved_usernames: config.reserved_usernames.clone(),
        };
        tokio::spawn(service.run(command_rx));

        AccountHandle {
            commands: command_tx,
            outcomes: outcome_rx,
            identity: identity_rx,
        }
    }

    async fn run(self, mut commands: mpsc::Receiver<Command>) {
        tracing::debug!("Account service started");

        while let Some(command) = commands.recv().await {
            let operation = command.operation();
            tracing::debug!("Handling {}", operation);

            tokio::time::sleep(self.latency).await;

            let outcome = match command {
                Command::UpdateProfile(request) => self.update_profile(request),
                Command::Logout => self.logout(),
            };

            if self.outcomes.send(outcome).await.is_err() {
                tracing::debug!("UI gone, dropping {} outcome", operation);
                break;
            }
        }

        tracing::debug!("Account service stopped");
    }

    fn update_profile(&self, request: UpdateProfileRequest) -> Outcome {
        if self.identity.borrow().is_none() {
            return Outcome::failure(Operation::ProfileUpdate, NOT_SIGNED_IN);
        }
        if self.fail_updates {
            return Outcome::failure(Operation::ProfileUpdate, UPDATE_FAILED);
        }
        if self
            .reserved_usernames
            .iter()
            .any(|name| name.eq_ignore_ascii_case(request.username.trim()))
        {
            return Outcome::failure(Operation::ProfileUpdate, USERNAME_TAKEN);
        }

        let identity = UserIdentity::new(request.username.trim(), request.email.trim());
        tracing::info!("Profile saved for {}", identity.username);
        self.identity.send_replace(Some(identity));
        Outcome::success(Operation::ProfileUpdate, PROFILE_UPDATED)
    }

    fn logout(&self) -> Outcome {
        if self.identity.borrow().is_none() {
            return Outcome::failure(Operation::Logout, NOT_SIGNED_IN);
        }
        self.identity.send_replace(None);
        Outcome::success(Operation::Logout, LOGGED_OUT)
    }
}
