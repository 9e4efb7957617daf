/// Session layer: the UI-facing facade and its external collaborators

pub mod collaborators;
pub mod facade;

pub use collaborators::{
    EntitlementProvider, NotificationOutcome, Notifier, NullNotifier, SessionEntitlements,
};
pub use facade::{SessionFacade, SubmitRequest};
