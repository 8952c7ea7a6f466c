use super::*;

#[derive(Debug)]
pub(super) enum ModalKind {
    /// Blocks until the user answers; the intent is dispatched only on yes.
    Confirm(Confirmation),
    Alert,
}

#[derive(Debug)]
pub(super) struct Modal {
    pub(super) title: String,
    pub(super) lines: Vec<String>,
    pub(super) kind: ModalKind,
}

impl Modal {
    pub(super) fn confirm(confirmation: Confirmation) -> Self {
        Self {
            title: "Confirm".to_string(),
            lines: vec![
                confirmation.prompt().to_string(),
                String::new(),
                "y/Enter: yes   n/Esc: no".to_string(),
            ],
            kind: ModalKind::Confirm(confirmation),
        }
    }

    pub(super) fn alert(title: &str, message: String) -> Self {
        Self {
            title: title.to_string(),
            lines: vec![message, String::new(), "Enter/Esc: close".to_string()],
            kind: ModalKind::Alert,
        }
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 70);
    let h = (modal.lines.len() as u16 + 2).clamp(5, area.height.max(5));
    let box_area = Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    };

    frame.render_widget(Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal.title.as_str());
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    enum ModalAction {
        None,
        Close,
        Answer(bool),
    }

    let action = match app.modal.as_ref().map(|m| &m.kind) {
        None => return,
        Some(ModalKind::Alert) => match key.code {
            KeyCode::Esc | KeyCode::Enter => ModalAction::Close,
            _ => ModalAction::None,
        },
        Some(ModalKind::Confirm(_)) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => ModalAction::Answer(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ModalAction::Answer(false),
            _ => ModalAction::None,
        },
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => {
            app.modal = None;
        }
        ModalAction::Answer(yes) => {
            if let Some(Modal {
                kind: ModalKind::Confirm(confirmation),
                ..
            }) = app.modal.take()
            {
                app.answer(confirmation, yes);
            }
        }
    }
}
