// TUI application state
//
// App owns every controller on the UI thread and routes input and account
// service outcomes between them. Rendering reads it and records hit areas so
// pointer events can be mapped back to buttons.

use crate::dropdown::{DropdownController, MenuItem, PointerHub};
use crate::events::{Command, Operation, Outcome};
use crate::identity::UserIdentity;
use crate::logging::LogBuffer;
use crate::loyalty::LoyaltyAccount;
use crate::notify::NotificationBridge;
use crate::profile::{ProfileEditController, ProfileField};
use crate::tui::theme::Theme;
use ratatui::layout::{Position, Rect};
use std::time::Duration;
use tokio::sync::mpsc;

const SERVICE_UNAVAILABLE: &str = "Could not reach the account service";

/// Pages the panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Signed-out landing page
    Landing,
    #[default]
    EditProfile,
    ChangePassword,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::EditProfile => "/edit-profile",
            Route::ChangePassword => "/change-password",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Storefront",
            Route::EditProfile => "Edit Profile",
            Route::ChangePassword => "Change Password",
        }
    }
}

/// Current route plus back history
#[derive(Debug, Default)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::info!("Navigate {} -> {}", self.current.path(), route.path());
        self.history.push(self.current);
        self.current = route;
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Go to the previous route; false when there is none
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(route) => {
                tracing::info!("Back {} -> {}", self.current.path(), route.path());
                self.current = route;
                true
            }
            None => false,
        }
    }
}

/// Screen regions recorded during the last draw
#[derive(Debug, Default)]
pub struct HitAreas {
    pub back: Rect,
    pub avatar: Rect,
    pub menu_items: Vec<(MenuItem, Rect)>,
    pub fields: Vec<(ProfileField, Rect)>,
    /// Edit or Update, depending on mode
    pub form_button: Rect,
}

/// Main application state for the TUI
pub struct App {
    pub router: Router,
    /// Last identity published by the account service
    pub identity: Option<UserIdentity>,
    pub profile: ProfileEditController,
    pub dropdown: DropdownController,
    pointer_hub: PointerHub,
    pub notifications: NotificationBridge,
    pub account: LoyaltyAccount,
    pub log_buffer: LogBuffer,
    pub hit_areas: HitAreas,
    pub theme: Theme,
    pub should_quit: bool,
    commands: mpsc::Sender<Command>,
}

impl App {
    pub fn new(
        identity: Option<UserIdentity>,
        account: LoyaltyAccount,
        log_buffer: LogBuffer,
        commands: mpsc::Sender<Command>,
        toast_duration: Duration,
    ) -> Self {
        let pointer_hub = PointerHub::new();
        let dropdown = DropdownController::mount(&pointer_hub);
        let start = if identity.is_some() {
            Route::EditProfile
        } else {
            Route::Landing
        };

        Self {
            router: Router::new(start),
            profile: ProfileEditController::new(identity.as_ref()),
            identity,
            dropdown,
            pointer_hub,
            notifications: NotificationBridge::new(toast_duration),
            account,
            log_buffer,
            hit_areas: HitAreas::default(),
            theme: Theme::default(),
            should_quit: false,
            commands,
        }
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    /// The account service published a new identity
    pub fn on_identity_changed(&mut self, identity: Option<UserIdentity>) {
        self.profile.on_identity_changed(identity.as_ref());
        self.identity = identity;
    }

    /// Route a completed operation to its controller and the bridge
    pub fn on_outcome(&mut self, outcome: Outcome) {
        self.profile.on_update_result(&outcome);

        let go_home = outcome.operation == Operation::Logout && outcome.is_success();
        self.notifications.on_outcome(outcome);

        if go_home {
            self.router.navigate(Route::Landing);
        }
    }

    fn dispatch(&mut self, command: Command) {
        let operation = command.operation();
        if let Err(e) = self.commands.try_send(command) {
            tracing::error!("Failed to send {}: {}", operation, e);
            self.on_outcome(Outcome::failure(operation, SERVICE_UNAVAILABLE));
        }
    }

    /// Submit the profile form if it is in a state to submit
    pub fn submit_profile(&mut self) {
        match self.profile.submit() {
            Ok(request) => {
                tracing::info!("Submitting profile update for {}", request.username);
                self.dispatch(Command::UpdateProfile(request));
            }
            Err(e) if e.is_validation() => {
                tracing::warn!("Profile submit rejected: {}", e);
                self.notifications.error(e.to_string());
            }
            Err(e) => tracing::debug!("Submit ignored: {}", e),
        }
    }

    /// Run a menu entry; the dropdown closes whatever happens
    pub fn select_menu_item(&mut self, item: MenuItem) {
        let Self {
            dropdown,
            router,
            commands,
            ..
        } = self;

        let result = dropdown.select_item(item, |item| match item {
            MenuItem::EditProfile => {
                router.navigate(Route::EditProfile);
                Ok(())
            }
            MenuItem::ChangePassword => {
                router.navigate(Route::ChangePassword);
                Ok(())
            }
            MenuItem::Logout => {
                tracing::info!("Logging out");
                commands.try_send(Command::Logout).map_err(|e| {
                    tracing::error!("Failed to send logout: {}", e);
                    Outcome::failure(Operation::Logout, SERVICE_UNAVAILABLE)
                })
            }
        });

        if let Err(outcome) = result {
            self.on_outcome(outcome);
        }
    }

    /// Pointer pressed at a screen cell
    pub fn handle_pointer_down(&mut self, position: Position) {
        // Outside-click listeners see the event first
        self.pointer_hub.dispatch(position);

        if self.hit_areas.avatar.contains(position) {
            self.dropdown.toggle();
            return;
        }

        if self.dropdown.is_open() {
            let hit = self
                .hit_areas
                .menu_items
                .iter()
                .find(|(_, rect)| rect.contains(position))
                .map(|(item, _)| *item);
            if let Some(item) = hit {
                self.select_menu_item(item);
            }
            return;
        }

        if self.hit_areas.back.contains(position) {
            self.router.back();
            return;
        }

        if self.route() != Route::EditProfile {
            return;
        }

        if self.hit_areas.form_button.contains(position) {
            if self.profile.is_editing() {
                self.submit_profile();
            } else {
                self.profile.enter_edit_mode();
            }
            return;
        }

        let field = self
            .hit_areas
            .fields
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(field, _)| *field);
        if let Some(field) = field {
            self.profile.focus(field);
        }
    }

    /// Periodic housekeeping
    pub fn tick(&mut self) {
        self.notifications.prune_expired();
    }
}
