//! Reconciliation of user intents with the remote collection.
//!
//! Every intent becomes exactly one remote call on a worker thread. Results
//! come back over a channel and are applied to [`AppState`] only when the
//! owner drains it, so mutations happen one at a time and in completion
//! order. Nothing touches the cache before the store confirms.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use log::debug;

use crate::cache::PersonCache;
use crate::config::ClientConfig;
use crate::error::{PhonebookError, TransportError, ValidationError};
use crate::filter::LookupView;
use crate::model::{Person, PersonDraft, PersonId, PersonPatch};
use crate::notify::{DEFAULT_TTL, NotificationChannel, NotificationKind};
use crate::remote::PersonStore;

mod settle;

/// Everything a front-end renders from.
#[derive(Debug, Default)]
pub struct AppState {
    pub cache: PersonCache,
    pub form: PersonDraft,
    pub notification: NotificationChannel,
    pub lookup: LookupView,
}

#[derive(Clone, Debug)]
pub struct ControllerSettings {
    pub notification_ttl: Duration,
    /// Also surface failed operations as a failure notification. Failures
    /// are always logged.
    pub notify_failures: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_TTL,
            notify_failures: true,
        }
    }
}

impl ControllerSettings {
    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self {
            notification_ttl: Duration::from_millis(cfg.notification_ms),
            notify_failures: cfg.notify_failures,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Load,
    Create(PersonDraft),
    Update {
        id: PersonId,
        name: String,
        patch: PersonPatch,
    },
    Delete {
        id: PersonId,
        name: String,
    },
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Load => "load",
            Intent::Create(_) => "create",
            Intent::Update { .. } => "update",
            Intent::Delete { .. } => "delete",
        }
    }

    fn guard_key(&self) -> GuardKey {
        match self {
            Intent::Load => GuardKey::Collection,
            Intent::Create(draft) => GuardKey::Name(draft.name.to_lowercase()),
            Intent::Update { id, .. } | Intent::Delete { id, .. } => GuardKey::Id(id.clone()),
        }
    }
}

/// An intent that must not be dispatched until the user says yes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    prompt: String,
    intent: Intent,
}

impl Confirmation {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn into_intent(self) -> Intent {
        self.intent
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Ready(Intent),
    NeedsConfirmation(Confirmation),
}

/// Blocking yes/no prompt used by [`Controller::submit`] and
/// [`Controller::delete_entity`].
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Dispatched(Ticket),
    Declined,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Loaded(usize),
    Created(Person),
    Updated(Person),
    Deleted(PersonId),
}

/// Report for one settled operation, returned after its mutation has been
/// applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settled {
    pub ticket: Ticket,
    pub intent: Intent,
    pub outcome: Result<Applied, PhonebookError>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum GuardKey {
    Collection,
    Name(String),
    Id(PersonId),
}

impl std::fmt::Display for GuardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardKey::Collection => f.write_str("the collection"),
            GuardKey::Name(name) => write!(f, "name {:?}", name),
            GuardKey::Id(id) => write!(f, "person {}", id),
        }
    }
}

enum Reply {
    Persons(Vec<Person>),
    Person(Person),
    Removed,
}

struct Completion {
    ticket: Ticket,
    result: Result<Reply, TransportError>,
}

pub struct Controller {
    store: Arc<dyn PersonStore>,
    settings: ControllerSettings,
    state: AppState,
    next_ticket: u64,
    in_flight: HashMap<Ticket, Intent>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Controller {
    pub fn new(store: Arc<dyn PersonStore>, settings: ControllerSettings) -> Self {
        let (tx, rx) = mpsc::channel();
        let state = AppState {
            notification: NotificationChannel::new(settings.notification_ttl),
            ..AppState::default()
        };
        Self {
            store,
            settings,
            state,
            next_ticket: 1,
            in_flight: HashMap::new(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn form_mut(&mut self) -> &mut PersonDraft {
        &mut self.state.form
    }

    pub fn lookup_mut(&mut self) -> &mut LookupView {
        &mut self.state.lookup
    }

    /// Number of operations still `Submitting`.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_in_flight(&self, id: &PersonId) -> bool {
        let key = GuardKey::Id(id.clone());
        self.in_flight.values().any(|i| i.guard_key() == key)
    }

    /// Expires the notification. Returns true when the visible state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.notification.expire(now)
    }

    pub fn load(&mut self) -> Result<Ticket, PhonebookError> {
        self.dispatch(Intent::Load)
    }

    /// Classifies the pending form as a create or an update. Updates always
    /// need confirmation; creates are validated here, before any remote call.
    pub fn prepare_submit(&self) -> Result<Decision, PhonebookError> {
        let draft = &self.state.form;

        if let Some(existing) = self.state.cache.find_by_name(&draft.name) {
            let intent = Intent::Update {
                id: existing.id.clone(),
                name: existing.name.clone(),
                patch: PersonPatch::number(draft.number.clone()),
            };
            self.check_guard(&intent)?;
            return Ok(Decision::NeedsConfirmation(Confirmation {
                prompt: format!("Update {}'s number to {}?", existing.name, draft.number),
                intent,
            }));
        }

        validate_draft(draft)?;
        let intent = Intent::Create(draft.clone());
        self.check_guard(&intent)?;
        Ok(Decision::Ready(intent))
    }

    pub fn prepare_delete(&self, id: &PersonId, name: &str) -> Result<Confirmation, PhonebookError> {
        let intent = Intent::Delete {
            id: id.clone(),
            name: name.to_string(),
        };
        self.check_guard(&intent)?;
        Ok(Confirmation {
            prompt: format!("Delete {}?", name),
            intent,
        })
    }

    pub fn decline(&self, confirmation: &Confirmation) {
        debug!(
            "event=intent_declined op={} prompt={:?}",
            confirmation.intent.label(),
            confirmation.prompt
        );
    }

    pub fn submit(&mut self, confirm: &mut impl Confirm) -> Result<SubmitOutcome, PhonebookError> {
        match self.prepare_submit()? {
            Decision::Ready(intent) => Ok(SubmitOutcome::Dispatched(self.dispatch(intent)?)),
            Decision::NeedsConfirmation(c) => self.confirm_and_dispatch(c, confirm),
        }
    }

    pub fn delete_entity(
        &mut self,
        id: &PersonId,
        name: &str,
        confirm: &mut impl Confirm,
    ) -> Result<SubmitOutcome, PhonebookError> {
        let c = self.prepare_delete(id, name)?;
        self.confirm_and_dispatch(c, confirm)
    }

    fn confirm_and_dispatch(
        &mut self,
        c: Confirmation,
        confirm: &mut impl Confirm,
    ) -> Result<SubmitOutcome, PhonebookError> {
        if !confirm.confirm(c.prompt()) {
            self.decline(&c);
            return Ok(SubmitOutcome::Declined);
        }
        Ok(SubmitOutcome::Dispatched(self.dispatch(c.into_intent())?))
    }

    /// Issues the remote call for an intent the user has already approved.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Ticket, PhonebookError> {
        if let Intent::Create(draft) = &intent {
            validate_draft(draft)?;
        }
        self.check_guard(&intent)?;

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight.insert(ticket, intent.clone());
        debug!("event=dispatch ticket={} op={}", ticket, intent.label());

        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = execute(store.as_ref(), &intent);
            // The controller may be gone by now; the result is then dropped.
            let _ = tx.send(Completion { ticket, result });
        });

        Ok(ticket)
    }

    /// Applies every completion that has already arrived.
    pub fn poll_settled(&mut self) -> Vec<Settled> {
        let mut out = Vec::new();
        while let Ok(c) = self.rx.try_recv() {
            if let Some(s) = self.apply(c) {
                out.push(s);
            }
        }
        out
    }

    /// Blocks until the next operation settles. Returns `None` when nothing
    /// is in flight.
    pub fn wait_settled(&mut self) -> Option<Settled> {
        while !self.in_flight.is_empty() {
            let c = self.rx.recv().ok()?;
            if let Some(s) = self.apply(c) {
                return Some(s);
            }
        }
        None
    }

    /// Waits for everything in flight, in completion order.
    pub fn drain(&mut self) -> Vec<Settled> {
        let mut out = Vec::new();
        while let Some(s) = self.wait_settled() {
            out.push(s);
        }
        out
    }

    fn check_guard(&self, intent: &Intent) -> Result<(), PhonebookError> {
        let key = intent.guard_key();
        // A load replaces the whole cache, so it conflicts with everything.
        let blocking = self.in_flight.values().find(|i| {
            matches!(intent, Intent::Load) || matches!(i, Intent::Load) || i.guard_key() == key
        });
        match blocking {
            Some(other) => Err(PhonebookError::Busy {
                target: other.guard_key().to_string(),
            }),
            None => Ok(()),
        }
    }
}

pub fn validate_draft(draft: &PersonDraft) -> Result<(), ValidationError> {
    match (draft.name.trim().is_empty(), draft.number.trim().is_empty()) {
        (true, true) => Err(ValidationError::EmptyDraft),
        (true, false) => Err(ValidationError::EmptyName),
        (false, true) => Err(ValidationError::EmptyNumber),
        (false, false) => Ok(()),
    }
}

fn execute(store: &dyn PersonStore, intent: &Intent) -> Result<Reply, TransportError> {
    match intent {
        Intent::Load => store.fetch_all().map(Reply::Persons),
        Intent::Create(draft) => store.create(draft).map(Reply::Person),
        Intent::Update { id, patch, .. } => store.update(id, patch).map(Reply::Person),
        Intent::Delete { id, .. } => store.remove(id).map(|()| Reply::Removed),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
