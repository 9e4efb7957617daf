/// Session facade: the one entry point UI events go through
///
/// Owns the record store, the filter state, and the last projection, and
/// keeps the rendering surface reconciled after every change. Mutations
/// are gated on the entitlement collaborator here - the store itself does
/// no authorization. All state is explicit and construction-time
/// initialized; there are no ambient globals and no implicit edit mode.

use crate::core::{ExportProjector, MarkerSurface, MarkerSync, QueryEngine};
use crate::error::{FloraError, Result};
use crate::session::collaborators::{EntitlementProvider, NotificationOutcome, Notifier};
use crate::store::{parse_window, FilterPredicate, Record, RecordDraft, RecordStore};
use regex::Regex;

/// One submit entry point, two explicit variants.
///
/// Replaces the old "are we editing right now" ambient flag: the request
/// itself says whether this is an insert or an edit of an existing id.
#[derive(Debug, Clone)]
pub enum SubmitRequest {
    Insert { draft: RecordDraft },
    Edit { id: i64, draft: RecordDraft },
}

pub struct SessionFacade<S, E, N>
where
    S: MarkerSurface,
    E: EntitlementProvider,
    N: Notifier,
{
    store: RecordStore,
    query: QueryEngine,
    surface: S,
    entitlements: E,
    notifier: N,
    predicate: FilterPredicate,
    projection: Vec<Record>,
    notify_address: Option<String>,
    last_notification: Option<NotificationOutcome>,
    address_regex: Regex,
}

impl<S, E, N> SessionFacade<S, E, N>
where
    S: MarkerSurface,
    E: EntitlementProvider,
    N: Notifier,
{
    pub fn new(store: RecordStore, surface: S, entitlements: E, notifier: N) -> Self {
        let query = QueryEngine::new(store.current_year());
        let mut facade = Self {
            store,
            query,
            surface,
            entitlements,
            notifier,
            predicate: FilterPredicate::default(),
            projection: Vec::new(),
            notify_address: None,
            last_notification: None,
            // Just a shape check, not RFC 5322. The real validation is the
            // provider bouncing the address.
            address_regex: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
                .expect("address pattern compiles"),
        };
        facade.refresh();
        facade
    }

    /// Re-derive the projection and reconcile the surface with it.
    fn refresh(&mut self) {
        self.projection = self.query.evaluate(&self.predicate, &self.store.working_set());
        MarkerSync::reconcile(&mut self.surface, &self.projection);
    }

    pub fn set_species_filter(&mut self, text: &str) {
        self.predicate.species_prefix = text.trim().to_string();
        self.refresh();
    }

    /// Set the recency window from raw input. Empty or unparseable text
    /// clears the window (match all) instead of erroring.
    pub fn set_recency_window(&mut self, raw: &str) {
        self.predicate.recency_window_years = parse_window(raw);
        self.refresh();
    }

    pub fn predicate(&self) -> &FilterPredicate {
        &self.predicate
    }

    /// The last projection the query engine produced
    pub fn projection(&self) -> &[Record] {
        &self.projection
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Insert or edit a record, then refresh the surface.
    ///
    /// Gated on the privileged-editor capability. A rejected or failed
    /// mutation leaves the store, the projection and the surface untouched.
    pub fn submit(&mut self, request: SubmitRequest) -> Result<Record> {
        self.require_editor()?;

        let record = match request {
            SubmitRequest::Insert { draft } => {
                let editor = self.entitlements.current_editor().unwrap_or("editor").to_string();
                self.store.insert(draft, &editor)?
            }
            SubmitRequest::Edit { id, draft } => self.store.edit(id, draft)?,
        };

        self.refresh();
        self.notify_event(&format!("Record saved: {}", record.scientific_name));
        Ok(record)
    }

    /// Delete an overlay record, then refresh the surface.
    pub fn delete(&mut self, id: i64) -> Result<Record> {
        self.require_editor()?;

        let removed = self.store.delete(id)?;
        self.refresh();
        self.notify_event(&format!("Record deleted: {}", removed.scientific_name));
        Ok(removed)
    }

    pub fn sign_in(&mut self, name: &str) -> bool {
        self.entitlements.sign_in(name)
    }

    pub fn sign_out(&mut self) {
        self.entitlements.sign_out();
    }

    /// One canonical status line for the entitlement state
    pub fn editor_status(&self) -> String {
        match self.entitlements.current_editor() {
            Some(name) => format!("Signed in as {} (privileged editor)", name),
            None => "Browsing as guest (read-only)".to_string(),
        }
    }

    /// Enroll an address for notifications and fire the welcome message.
    ///
    /// Enrollment succeeds even when the welcome send fails; the outcome is
    /// returned so the caller can tell the user, nothing more.
    pub fn enroll_notifications(&mut self, address: &str) -> Result<NotificationOutcome> {
        let trimmed = address.trim();
        if !self.address_regex.is_match(trimmed) {
            return Err(FloraError::Validation(format!(
                "'{}' does not look like a valid address",
                trimmed
            )));
        }

        self.notify_address = Some(trimmed.to_string());
        let outcome = self
            .notifier
            .send(trimmed, "You are now enrolled in plant record updates.");
        self.last_notification = Some(outcome.clone());
        Ok(outcome)
    }

    pub fn notifications_enrolled(&self) -> bool {
        self.notify_address.is_some()
    }

    /// Outcome of the most recent notification attempt, if any
    pub fn last_notification(&self) -> Option<&NotificationOutcome> {
        self.last_notification.as_ref()
    }

    /// Export the last projection as CSV bytes.
    pub fn export(&self) -> Result<Vec<u8>> {
        ExportProjector::to_csv(&self.projection)
    }

    fn require_editor(&self) -> Result<()> {
        if self.entitlements.is_privileged_editor() {
            Ok(())
        } else {
            Err(FloraError::NotPermitted)
        }
    }

    fn notify_event(&mut self, message: &str) {
        if let Some(address) = &self.notify_address {
            let outcome = self.notifier.send(address, message);
            self.last_notification = Some(outcome);
        }
    }
}
