use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, chunks[0], app);
    draw_search(frame, chunks[1], app);
    draw_form(frame, chunks[2], app);
    draw_list(frame, chunks[3], app);
    draw_footer(frame, chunks[4], app);
    draw_notification(frame, area, app);

    if let Some(modal) = &app.modal {
        modal::draw_modal(frame, modal);
    }
}

fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "Phonebook",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::raw(app.base_url.as_str()),
    ];
    if let Some(status) = app.status.as_deref() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status, Style::default().fg(Color::DarkGray)));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn draw_search(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Filter;
    let mut lines = vec![Line::from(app.filter.buf.as_str())];
    if app.searched {
        lines.push(match &app.search_hit {
            Some(p) => Line::from(vec![
                Span::styled("Filtered contact: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{}: {}", p.name, p.number)),
            ]),
            None => Line::from(Span::styled(
                "no exact match",
                Style::default().fg(Color::DarkGray),
            )),
        });
    }
    frame.render_widget(
        Paragraph::new(lines).block(field_block("Search by name or number (Enter)", focused)),
        area,
    );
    if focused && app.modal.is_none() {
        frame.set_cursor_position((area.x + 1 + app.filter.cursor as u16, area.y + 1));
    }
}

fn draw_form(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (i, (title, input, focus)) in [
        ("Name", &app.name, Focus::Name),
        ("Number", &app.number, Focus::Number),
    ]
    .into_iter()
    .enumerate()
    {
        let focused = app.focus == focus;
        frame.render_widget(
            Paragraph::new(input.buf.as_str()).block(field_block(title, focused)),
            parts[i],
        );
        if focused && app.modal.is_none() {
            frame.set_cursor_position((parts[i].x + 1 + input.cursor as u16, parts[i].y + 1));
        }
    }
}

fn draw_list(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let persons = app.visible_persons();
    let items: Vec<ListItem> = persons
        .iter()
        .map(|p| {
            let mut spans = vec![Span::raw(format!("{}: {}", p.name, p.number))];
            if app.controller.is_in_flight(&p.id) {
                spans.push(Span::styled("  (saving)", Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(
        "Numbers ({}/{})",
        persons.len(),
        app.controller.state().cache.len()
    );
    let list = List::new(items)
        .block(field_block(&title, app.focus == Focus::List))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if app.focus == Focus::List && !persons.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let mut text = String::from("Tab: focus  Enter: search/add  d: delete  Ctrl-R: reload  Esc: quit");
    let pending = app.controller.pending();
    if pending > 0 {
        text.push_str(&format!("  [{} pending]", pending));
    }
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_notification(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let Some(n) = app.controller.state().notification.visible(Instant::now()) else {
        return;
    };
    let color = match n.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Failure => Color::Red,
    };

    let w = (n.message.chars().count() as u16 + 4).min(area.width);
    let h = 3.min(area.height);
    let toast = Rect {
        x: area.x + area.width.saturating_sub(w + 1),
        y: area.y + area.height.saturating_sub(h + 1),
        width: w,
        height: h,
    };
    frame.render_widget(Clear, toast);
    frame.render_widget(
        Paragraph::new(n.message.as_str())
            .style(Style::default().fg(Color::White).bg(color))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().bg(color))),
        toast,
    );
}
