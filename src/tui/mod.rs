mod app;
mod handlers;
mod keymap;
mod theme;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use kbdlayer_core::Settings;
use ratatui::prelude::*;

use app::App;
use handlers::handle_input;
use ui::draw_ui;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn init_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Draw and dispatch keys until the user quits
fn event_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Release and repeat events carry no new input for the layout
        if key.kind == KeyEventKind::Press && handle_input(app, key.code, key.modifiers) {
            return Ok(());
        }
    }
}

pub fn run(layout_path: &Path, settings: &Settings) -> Result<()> {
    let mut app = App::new(layout_path, settings)?;

    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, &mut app);
    // Leave the alternate screen even when the loop failed
    restore_terminal(&mut terminal)?;
    Ok(result?)
}
