use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if app.pump(Instant::now()) {
            dirty = true;
        }

        if dirty {
            terminal
                .draw(|f| super::render::draw(f, app))
                .context("draw")?;
            dirty = false;
        }
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    handle_key(app, k);
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => app.quit = true,
            KeyCode::Char('r') => app.reload(),
            KeyCode::Char('u') => {
                if let Some(input) = app.focused_input_mut() {
                    input.clear();
                }
                app.sync_fields();
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit = true,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),

        KeyCode::Enter => match app.focus {
            Focus::Filter => app.search(),
            Focus::Name | Focus::Number => app.submit(),
            Focus::List => {}
        },

        KeyCode::Up if app.focus == Focus::List => app.move_selection(-1),
        KeyCode::Down if app.focus == Focus::List => app.move_selection(1),
        KeyCode::Delete | KeyCode::Char('d') if app.focus == Focus::List => {
            app.request_delete()
        }
        KeyCode::Char('r') if app.focus == Focus::List => app.reload(),

        KeyCode::Left => {
            if let Some(input) = app.focused_input_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.focused_input_mut() {
                input.move_right();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.focused_input_mut() {
                input.backspace();
            }
            app.sync_fields();
        }
        KeyCode::Delete => {
            if let Some(input) = app.focused_input_mut() {
                input.delete();
            }
            app.sync_fields();
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.focused_input_mut() {
                input.insert_char(c);
            }
            app.sync_fields();
        }

        _ => {}
    }
}
