use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::config::ClientConfig;
use crate::controller::{
    Applied, Confirmation, Controller, ControllerSettings, Decision, Intent, Settled,
};
use crate::error::PhonebookError;
use crate::filter::find_exact;
use crate::model::Person;
use crate::notify::NotificationKind;
use crate::remote::RemoteClient;

mod app;
use app::App;

mod event_loop;
use event_loop::run_loop;

mod input;
use input::Input;

mod modal;
use modal::Modal;

mod render;

pub fn run(config: ClientConfig) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let client = RemoteClient::new(&config.base_url)?;
    let controller = Controller::new(Arc::new(client), ControllerSettings::from_config(&config));
    let mut app = App::new(controller, config.base_url.clone());
    app.reload();

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Filter,
    Name,
    Number,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Filter => Focus::Name,
            Focus::Name => Focus::Number,
            Focus::Number => Focus::List,
            Focus::List => Focus::Filter,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Filter => Focus::List,
            Focus::Name => Focus::Filter,
            Focus::Number => Focus::Name,
            Focus::List => Focus::Number,
        }
    }
}
