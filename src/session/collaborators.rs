/// External collaborator seams for the session layer
///
/// Identity/entitlement and outbound notification both live outside the
/// core. The session facade only sees these traits: a boolean "privileged
/// editor" capability on one side, a fire-and-forget message sink on the
/// other.

/// Identity provider exposing the privileged-editor capability
pub trait EntitlementProvider {
    /// Attempt to sign in; returns whether the session is now privileged.
    fn sign_in(&mut self, name: &str) -> bool;

    /// Drop the current session's entitlements.
    fn sign_out(&mut self);

    /// Whether the current session may insert/edit/delete records
    fn is_privileged_editor(&self) -> bool;

    /// Display name of the current editor, if signed in
    fn current_editor(&self) -> Option<&str>;
}

/// Session-local entitlements: any named sign-in is a privileged editor.
///
/// Stands in for the real identity provider, which is out of scope; the
/// facade only ever reads the capability flag.
#[derive(Debug, Default)]
pub struct SessionEntitlements {
    editor: Option<String>,
}

impl EntitlementProvider for SessionEntitlements {
    fn sign_in(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.editor = Some(trimmed.to_string());
        true
    }

    fn sign_out(&mut self) {
        self.editor = None;
    }

    fn is_privileged_editor(&self) -> bool {
        self.editor.is_some()
    }

    fn current_editor(&self) -> Option<&str> {
        self.editor.as_deref()
    }
}

/// Result of handing a message to the notification sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Delivered,
    Failed(String),
}

impl NotificationOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationOutcome::Delivered)
    }
}

/// Outbound notification sink
///
/// Fire-and-forget from the session's point of view: the outcome is
/// reported to the user but never gates a state change.
pub trait Notifier {
    fn send(&self, recipient: &str, message: &str) -> NotificationOutcome;
}

/// Notifier that drops everything on the floor, successfully.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send(&self, _recipient: &str, _message: &str) -> NotificationOutcome {
        NotificationOutcome::Delivered
    }
}
