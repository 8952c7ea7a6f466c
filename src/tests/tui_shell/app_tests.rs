use std::sync::Mutex;

use crossterm::event::{KeyEvent, KeyModifiers};

use super::*;
use crate::error::TransportError;
use crate::model::{PersonDraft, PersonId, PersonPatch};
use crate::remote::PersonStore;
use crate::tui_shell::event_loop::handle_key;

#[derive(Default)]
struct MemoryStore {
    persons: Mutex<Vec<Person>>,
}

impl PersonStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Person>, TransportError> {
        Ok(self.persons.lock().unwrap().clone())
    }

    fn create(&self, draft: &PersonDraft) -> Result<Person, TransportError> {
        let mut persons = self.persons.lock().unwrap();
        let p = Person {
            id: PersonId::new(format!("p{}", persons.len() + 1)),
            name: draft.name.clone(),
            number: draft.number.clone(),
        };
        persons.push(p.clone());
        Ok(p)
    }

    fn update(&self, id: &PersonId, patch: &PersonPatch) -> Result<Person, TransportError> {
        let mut persons = self.persons.lock().unwrap();
        let p = persons
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| TransportError::NotFound {
                label: "update person".to_string(),
                id: id.clone(),
            })?;
        if let Some(n) = &patch.number {
            p.number = n.clone();
        }
        Ok(p.clone())
    }

    fn remove(&self, id: &PersonId) -> Result<(), TransportError> {
        self.persons.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}

fn app_with(entries: &[(&str, &str)]) -> App {
    let store = MemoryStore::default();
    {
        let mut persons = store.persons.lock().unwrap();
        for (i, (name, number)) in entries.iter().enumerate() {
            persons.push(Person {
                id: PersonId::new(format!("s{}", i + 1)),
                name: name.to_string(),
                number: number.to_string(),
            });
        }
    }
    let controller = Controller::new(Arc::new(store), ControllerSettings::default());
    let mut app = App::new(controller, "http://test".to_string());
    app.reload();
    settle(&mut app);
    app
}

fn settle(app: &mut App) {
    let settled = app.controller.drain();
    app.absorb(settled);
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn load_reports_contact_count() {
    let app = app_with(&[("Ada", "1"), ("Alan", "2")]);
    assert_eq!(app.status.as_deref(), Some("2 contacts from http://test"));
    assert_eq!(app.visible_persons().len(), 2);
}

#[test]
fn adding_through_the_form_clears_the_fields() {
    let mut app = app_with(&[]);
    assert_eq!(app.focus, Focus::Name);
    type_text(&mut app, "Bob");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "040-1");
    press(&mut app, KeyCode::Enter);
    assert!(app.modal.is_none());

    settle(&mut app);
    assert_eq!(app.controller.state().cache.len(), 1);
    assert!(app.name.buf.is_empty());
    assert!(app.number.buf.is_empty());
}

#[test]
fn missing_number_opens_an_alert_and_keeps_input() {
    let mut app = app_with(&[]);
    type_text(&mut app, "Bob");
    press(&mut app, KeyCode::Enter);

    let modal = app.modal.as_ref().expect("alert");
    assert_eq!(modal.title, "Missing input");
    assert_eq!(app.controller.pending(), 0);

    press(&mut app, KeyCode::Esc);
    assert!(app.modal.is_none());
    assert_eq!(app.name.buf, "Bob");
}

#[test]
fn existing_name_asks_before_updating() {
    let mut app = app_with(&[("Ada", "1")]);
    type_text(&mut app, "ada");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "2");
    press(&mut app, KeyCode::Enter);

    let modal = app.modal.as_ref().expect("confirm");
    assert_eq!(modal.lines[0], "Update Ada's number to 2?");

    press(&mut app, KeyCode::Char('n'));
    assert!(app.modal.is_none());
    assert_eq!(app.controller.pending(), 0);
    assert_eq!(app.number.buf, "2");

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('y'));
    settle(&mut app);
    assert_eq!(app.controller.state().cache.as_slice()[0].number, "2");
    assert!(app.name.buf.is_empty());
}

#[test]
fn filter_narrows_the_list_and_delete_targets_the_selection() {
    let mut app = app_with(&[("Ada", "1"), ("Alan", "2"), ("Bob", "3")]);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, Focus::Filter);
    type_text(&mut app, "b");
    assert_eq!(app.visible_persons().len(), 1);

    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, Focus::List);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(
        app.modal.as_ref().map(|m| m.lines[0].as_str()),
        Some("Delete Bob?")
    );
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    let names: Vec<_> = app
        .controller
        .state()
        .cache
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ada", "Alan"]);
    assert!(app.visible_persons().is_empty());
}

#[test]
fn search_finds_exact_name_or_number() {
    let mut app = app_with(&[("Ada", "040-1"), ("Alan", "050-2")]);
    app.focus = Focus::Filter;
    type_text(&mut app, "050-2");
    press(&mut app, KeyCode::Enter);
    assert!(app.searched);
    assert_eq!(app.search_hit.as_ref().map(|p| p.name.as_str()), Some("Alan"));

    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Enter);
    assert!(app.search_hit.is_none());
}
