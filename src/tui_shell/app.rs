use super::*;

pub(super) struct App {
    pub(super) controller: Controller,
    pub(super) base_url: String,

    pub(super) focus: Focus,
    pub(super) filter: Input,
    pub(super) name: Input,
    pub(super) number: Input,

    /// Index into the filtered list, not into the cache.
    pub(super) selected: usize,

    // Result of the last explicit search; `None` with `searched` set means
    // nothing matched.
    pub(super) search_hit: Option<Person>,
    pub(super) searched: bool,

    pub(super) modal: Option<Modal>,
    pub(super) status: Option<String>,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(controller: Controller, base_url: String) -> Self {
        Self {
            controller,
            base_url,
            focus: Focus::Name,
            filter: Input::default(),
            name: Input::default(),
            number: Input::default(),
            selected: 0,
            search_hit: None,
            searched: false,
            modal: None,
            status: None,
            quit: false,
        }
    }

    pub(super) fn reload(&mut self) {
        match self.controller.load() {
            Ok(_) => self.status = Some("loading...".to_string()),
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Applies finished operations and expires the notification. Returns
    /// true when anything visible changed.
    pub(super) fn pump(&mut self, now: Instant) -> bool {
        let settled = self.controller.poll_settled();
        let changed = !settled.is_empty();
        if changed {
            self.absorb(settled);
        }
        self.controller.tick(now) || changed
    }

    pub(super) fn absorb(&mut self, settled: Vec<Settled>) {
        for s in &settled {
            if matches!(s.intent, Intent::Load) {
                self.status = Some(match &s.outcome {
                    Ok(Applied::Loaded(n)) => format!("{} contacts from {}", n, self.base_url),
                    Ok(_) => String::new(),
                    Err(err) => format!("load failed: {}", err),
                });
            }
        }

        // The form is owned by the controller; mirror it back after a
        // successful create or update cleared it.
        let form = self.controller.state().form.clone();
        if self.name.buf != form.name {
            self.name.set(&form.name);
        }
        if self.number.buf != form.number {
            self.number.set(&form.number);
        }

        if let Some(hit) = self.search_hit.take() {
            self.search_hit = self.controller.state().cache.get(&hit.id).cloned();
        }
        self.clamp_selection();
    }

    pub(super) fn visible_persons(&self) -> Vec<&Person> {
        let state = self.controller.state();
        state.lookup.matches(&state.cache)
    }

    pub(super) fn selected_person(&self) -> Option<Person> {
        self.visible_persons().get(self.selected).map(|p| (*p).clone())
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let n = self.visible_persons().len();
        if n == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(n as isize) as usize;
    }

    fn clamp_selection(&mut self) {
        let n = self.visible_persons().len();
        self.selected = self.selected.min(n.saturating_sub(1));
    }

    pub(super) fn focused_input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            Focus::Filter => Some(&mut self.filter),
            Focus::Name => Some(&mut self.name),
            Focus::Number => Some(&mut self.number),
            Focus::List => None,
        }
    }

    /// Pushes the edited text fields into controller state.
    pub(super) fn sync_fields(&mut self) {
        let query = self.filter.buf.clone();
        self.controller.lookup_mut().set_query(query);
        let form = self.controller.form_mut();
        form.name = self.name.buf.clone();
        form.number = self.number.buf.clone();
        self.clamp_selection();
    }

    pub(super) fn search(&mut self) {
        let state = self.controller.state();
        self.search_hit = find_exact(&state.cache, &self.filter.buf).cloned();
        self.searched = true;
    }

    pub(super) fn submit(&mut self) {
        self.sync_fields();
        match self.controller.prepare_submit() {
            Ok(Decision::Ready(intent)) => {
                if let Err(err) = self.controller.dispatch(intent) {
                    self.show_error(err);
                }
            }
            Ok(Decision::NeedsConfirmation(c)) => {
                self.modal = Some(Modal::confirm(c));
            }
            Err(err) => self.show_error(err),
        }
    }

    pub(super) fn request_delete(&mut self) {
        let Some(person) = self.selected_person() else {
            return;
        };
        match self.controller.prepare_delete(&person.id, &person.name) {
            Ok(c) => self.modal = Some(Modal::confirm(c)),
            Err(err) => self.show_error(err),
        }
    }

    pub(super) fn answer(&mut self, confirmation: Confirmation, yes: bool) {
        if !yes {
            self.controller.decline(&confirmation);
            return;
        }
        if let Err(err) = self.controller.dispatch(confirmation.into_intent()) {
            self.show_error(err);
        }
    }

    fn show_error(&mut self, err: PhonebookError) {
        let title = match err {
            PhonebookError::Validation(_) => "Missing input",
            PhonebookError::Busy { .. } => "Busy",
            PhonebookError::Transport(_) => "Error",
        };
        self.modal = Some(Modal::alert(title, err.to_string()));
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
