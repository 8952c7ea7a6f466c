use log::{info, warn};

use super::*;

impl Controller {
    pub(super) fn apply(&mut self, completion: Completion) -> Option<Settled> {
        let Completion { ticket, result } = completion;
        let Some(intent) = self.in_flight.remove(&ticket) else {
            warn!("event=settle status=unknown_ticket ticket={}", ticket);
            return None;
        };

        let outcome = match result {
            Ok(reply) => self.apply_success(&intent, reply),
            Err(err) => Err(PhonebookError::Transport(err)),
        };

        if let Err(err) = &outcome {
            self.report_failure(ticket, &intent, err);
        }

        Some(Settled {
            ticket,
            intent,
            outcome,
        })
    }

    fn apply_success(&mut self, intent: &Intent, reply: Reply) -> Result<Applied, PhonebookError> {
        let now = Instant::now();
        match (intent, reply) {
            (Intent::Load, Reply::Persons(persons)) => {
                let n = persons.len();
                self.state.cache.replace_all(persons);
                info!("event=person_load status=ok count={}", n);
                Ok(Applied::Loaded(n))
            }

            (Intent::Create(_), Reply::Person(person)) => {
                info!(
                    "event=person_create status=ok id={} name={:?}",
                    person.id, person.name
                );
                self.state.notification.notify(
                    format!("Added {}", person.name),
                    NotificationKind::Success,
                    now,
                );
                self.state.cache.append(person.clone());
                self.state.form.clear();
                Ok(Applied::Created(person))
            }

            (Intent::Update { id, .. }, Reply::Person(person)) => {
                if &person.id != id {
                    return Err(malformed(intent, "response id does not match target"));
                }
                // A concurrent delete may have removed the entry already; an
                // update never resurrects it.
                if !self.state.cache.replace(person.clone()) {
                    warn!("event=person_update status=stale id={}", person.id);
                }
                info!(
                    "event=person_update status=ok id={} name={:?}",
                    person.id, person.name
                );
                self.state.notification.notify(
                    format!("Updated {}'s number", person.name),
                    NotificationKind::Success,
                    now,
                );
                self.state.form.clear();
                Ok(Applied::Updated(person))
            }

            (Intent::Delete { id, name }, Reply::Removed) => {
                self.state.cache.remove(id);
                info!("event=person_delete status=ok id={} name={:?}", id, name);
                // Deletion is shown with the failure styling.
                self.state.notification.notify(
                    format!("Deleted {}", name),
                    NotificationKind::Failure,
                    now,
                );
                Ok(Applied::Deleted(id.clone()))
            }

            (intent, _) => Err(malformed(intent, "unexpected reply kind")),
        }
    }

    fn report_failure(&mut self, ticket: Ticket, intent: &Intent, err: &PhonebookError) {
        warn!(
            "event=person_{} status=error ticket={} err={}",
            intent.label(),
            ticket,
            err
        );
        if !self.settings.notify_failures {
            return;
        }
        let message = match intent {
            Intent::Load => format!("Could not load the phonebook: {}", err),
            Intent::Create(draft) => format!("Could not add {}: {}", draft.name, err),
            Intent::Update { name, .. } => format!("Could not update {}: {}", name, err),
            Intent::Delete { name, .. } => format!("Could not delete {}: {}", name, err),
        };
        self.state
            .notification
            .notify(message, NotificationKind::Failure, Instant::now());
    }
}

fn malformed(intent: &Intent, reason: &str) -> PhonebookError {
    PhonebookError::Transport(TransportError::Malformed {
        label: format!("{} person", intent.label()),
        reason: reason.to_string(),
    })
}
