// Profile edit controller
//
// Owns the editable copy of the user's identity, the read-only/editing mode
// and the pending flag for the single in-flight update.
//
//   ReadOnly --enter_edit_mode--> Editing --submit--> Editing(pending)
//   Editing(pending) --success--> ReadOnly
//   Editing(pending) --failure--> Editing   (values kept for retry)

use crate::events::{Operation, Outcome, UpdateProfileRequest};
use crate::identity::UserIdentity;
use regex::Regex;
use std::sync::LazyLock;

/// Basic `local@domain.tld` shape, same rule a browser applies to type=email
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A field of the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Username,
    Email,
}

impl ProfileField {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Username => "Username",
            ProfileField::Email => "Email",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ProfileField::Username => "Enter the Username",
            ProfileField::Email => "Enter the Email",
        }
    }

    /// Tab order
    pub fn next(self) -> Self {
        match self {
            ProfileField::Username => ProfileField::Email,
            ProfileField::Email => ProfileField::Username,
        }
    }
}

/// Whether the form accepts input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    ReadOnly,
    Editing,
}

/// Reasons a submit produced no request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("{} is required", .0.label())]
    EmptyField(ProfileField),

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("profile is read-only")]
    NotEditing,

    #[error("an update is already in flight")]
    Pending,
}

impl ProfileError {
    /// Validation errors are shown to the user; the other variants are
    /// silently ignored submits (disabled control).
    pub fn is_validation(&self) -> bool {
        matches!(self, ProfileError::EmptyField(_) | ProfileError::InvalidEmail)
    }
}

/// Local, mutable copy of the identity fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
}

impl ProfileForm {
    pub fn from_identity(identity: Option<&UserIdentity>) -> Self {
        match identity {
            Some(id) => Self {
                username: id.username.clone(),
                email: id.email.clone(),
            },
            None => Self::default(),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Username => &self.username,
            ProfileField::Email => &self.email,
        }
    }

    fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Username => &mut self.username,
            ProfileField::Email => &mut self.email,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.username.trim().is_empty() {
            return Err(ProfileError::EmptyField(ProfileField::Username));
        }
        if self.email.trim().is_empty() {
            return Err(ProfileError::EmptyField(ProfileField::Email));
        }
        if !EMAIL_SHAPE.is_match(self.email.trim()) {
            return Err(ProfileError::InvalidEmail);
        }
        Ok(())
    }

    pub fn to_request(&self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Drives the edit-profile form
#[derive(Debug, Clone, Default)]
pub struct ProfileEditController {
    form: ProfileForm,
    mode: EditMode,
    pending: bool,
    focused: ProfileField,
}

impl ProfileEditController {
    pub fn new(identity: Option<&UserIdentity>) -> Self {
        Self {
            form: ProfileForm::from_identity(identity),
            ..Self::default()
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn focused_field(&self) -> ProfileField {
        self.focused
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus(&mut self, field: ProfileField) {
        self.focused = field;
    }

    /// Re-seed from the authoritative identity. Unsaved edits are dropped.
    pub fn on_identity_changed(&mut self, identity: Option<&UserIdentity>) {
        if self.is_editing() && self.form != ProfileForm::from_identity(identity) {
            tracing::debug!("Identity changed while editing, discarding unsaved edits");
        }
        self.form = ProfileForm::from_identity(identity);
    }

    /// Replace one field. Returns false when the form is read-only.
    pub fn on_field_change(&mut self, field: ProfileField, value: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        *self.form.field_mut(field) = value.into();
        true
    }

    /// Append a typed character to the focused field
    pub fn push_char(&mut self, c: char) -> bool {
        let mut value = self.form.get(self.focused).to_string();
        value.push(c);
        self.on_field_change(self.focused, value)
    }

    /// Delete the last character of the focused field
    pub fn pop_char(&mut self) -> bool {
        let mut value = self.form.get(self.focused).to_string();
        value.pop();
        self.on_field_change(self.focused, value)
    }

    pub fn enter_edit_mode(&mut self) {
        if self.mode == EditMode::ReadOnly {
            tracing::debug!("Profile form: ReadOnly -> Editing");
            self.mode = EditMode::Editing;
        }
    }

    /// Build the update request and mark it in flight.
    ///
    /// No dirty check: an unchanged form still yields a request. The mode is
    /// not touched here; `on_update_result` decides it.
    pub fn submit(&mut self) -> Result<UpdateProfileRequest, ProfileError> {
        if !self.is_editing() {
            return Err(ProfileError::NotEditing);
        }
        if self.pending {
            return Err(ProfileError::Pending);
        }
        self.form.validate()?;

        self.pending = true;
        Ok(self.form.to_request())
    }

    /// Apply the result of the in-flight update
    pub fn on_update_result(&mut self, outcome: &Outcome) {
        if outcome.operation != Operation::ProfileUpdate {
            return;
        }
        self.pending = false;
        match &outcome.result {
            Ok(_) => {
                tracing::debug!("Profile form: update succeeded, Editing -> ReadOnly");
                self.mode = EditMode::ReadOnly;
            }
            Err(e) => {
                tracing::debug!("Profile form: update failed ({}), staying in Editing", e);
            }
        }
    }

    /// Submit control is disabled while a request is in flight
    pub fn is_submit_enabled(&self) -> bool {
        self.is_editing() && !self.pending
    }

    pub fn submit_label(&self) -> &'static str {
        if self.pending {
            "Loading...."
        } else {
            "Update"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserIdentity {
        UserIdentity::new("alice", "alice@example.com")
    }

    fn editing() -> ProfileEditController {
        let mut ctl = ProfileEditController::new(Some(&alice()));
        ctl.enter_edit_mode();
        ctl
    }

    #[test]
    fn test_initialize_seeds_form_read_only() {
        let ctl = ProfileEditController::new(Some(&alice()));
        assert_eq!(ctl.form().username, "alice");
        assert_eq!(ctl.form().email, "alice@example.com");
        assert_eq!(ctl.mode(), EditMode::ReadOnly);
        assert!(!ctl.is_pending());
    }

    #[test]
    fn test_field_change_ignored_while_read_only() {
        let mut ctl = ProfileEditController::new(Some(&alice()));
        assert!(!ctl.on_field_change(ProfileField::Username, "mallory"));
        assert!(!ctl.push_char('x'));
        assert_eq!(ctl.form().username, "alice");
    }

    #[test]
    fn test_field_change_updates_exactly_one_field() {
        let mut ctl = editing();
        assert!(ctl.on_field_change(ProfileField::Email, "a@b.co"));
        assert_eq!(ctl.form().email, "a@b.co");
        assert_eq!(ctl.form().username, "alice");
    }

    #[test]
    fn test_enter_edit_mode_is_idempotent() {
        let mut ctl = editing();
        ctl.on_field_change(ProfileField::Username, "bob");
        ctl.enter_edit_mode();
        assert_eq!(ctl.mode(), EditMode::Editing);
        assert_eq!(ctl.form().username, "bob");
    }

    #[test]
    fn test_submit_requires_edit_mode() {
        let mut ctl = ProfileEditController::new(Some(&alice()));
        assert_eq!(ctl.submit(), Err(ProfileError::NotEditing));
        assert!(!ctl.is_pending());
    }

    #[test]
    fn test_unchanged_form_still_dispatches() {
        let mut ctl = editing();
        let request = ctl.submit().unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.email, "alice@example.com");
        assert!(ctl.is_pending());
        assert_eq!(ctl.mode(), EditMode::Editing);
    }

    #[test]
    fn test_second_submit_while_pending_has_no_effect() {
        let mut ctl = editing();
        let mut requests = Vec::new();
        requests.extend(ctl.submit().ok());
        requests.extend(ctl.submit().ok());
        assert_eq!(requests.len(), 1);
        assert_eq!(ctl.submit(), Err(ProfileError::Pending));
        assert!(!ctl.is_submit_enabled());
        assert_eq!(ctl.submit_label(), "Loading....");
    }

    #[test]
    fn test_success_returns_to_read_only() {
        let mut ctl = editing();
        ctl.submit().unwrap();
        ctl.on_update_result(&Outcome::success(Operation::ProfileUpdate, "Profile updated"));
        assert_eq!(ctl.mode(), EditMode::ReadOnly);
        assert!(!ctl.is_pending());
    }

    #[test]
    fn test_failure_keeps_values_for_retry() {
        let mut ctl = editing();
        ctl.on_field_change(ProfileField::Username, "alice2");
        ctl.submit().unwrap();
        ctl.on_update_result(&Outcome::failure(Operation::ProfileUpdate, "Update failed"));

        assert_eq!(ctl.mode(), EditMode::Editing);
        assert!(!ctl.is_pending());
        assert_eq!(ctl.form().username, "alice2");
        assert!(ctl.submit().is_ok());
    }

    #[test]
    fn test_logout_outcome_does_not_touch_form() {
        let mut ctl = editing();
        ctl.submit().unwrap();
        ctl.on_update_result(&Outcome::success(Operation::Logout, "Logged out"));
        assert!(ctl.is_pending());
        assert_eq!(ctl.mode(), EditMode::Editing);
    }

    #[test]
    fn test_validation_rejects_before_dispatch() {
        let mut ctl = editing();
        ctl.on_field_change(ProfileField::Username, "   ");
        assert_eq!(
            ctl.submit(),
            Err(ProfileError::EmptyField(ProfileField::Username))
        );
        assert!(!ctl.is_pending());

        ctl.on_field_change(ProfileField::Username, "alice");
        ctl.on_field_change(ProfileField::Email, "not-an-email");
        let err = ctl.submit().unwrap_err();
        assert_eq!(err, ProfileError::InvalidEmail);
        assert!(err.is_validation());
        assert!(!ctl.is_pending());
    }

    #[test]
    fn test_identity_change_discards_edits() {
        let mut ctl = editing();
        ctl.on_field_change(ProfileField::Username, "draft");

        let bob = UserIdentity::new("bob", "bob@example.com");
        ctl.on_identity_changed(Some(&bob));
        assert_eq!(ctl.form().username, "bob");
        assert_eq!(ctl.form().email, "bob@example.com");

        ctl.on_identity_changed(None);
        assert_eq!(ctl.form(), &ProfileForm::default());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut ctl = editing();
        ctl.focus(ProfileField::Email);
        ctl.on_field_change(ProfileField::Email, "a@b.c");
        ctl.push_char('o');
        assert_eq!(ctl.form().email, "a@b.co");
        ctl.pop_char();
        ctl.pop_char();
        assert_eq!(ctl.form().email, "a@b.");

        ctl.focus_next();
        assert_eq!(ctl.focused_field(), ProfileField::Username);
    }
}
