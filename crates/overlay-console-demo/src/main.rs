use anyhow::Result;
use overlay_console_config::AppConfig;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

mod app;
mod log_reader;
mod logger;
mod render;

use app::App;

fn main() -> Result<()> {
    let log_file = logger::init()?;

    let config = AppConfig::load();
    logger::apply_level(config.logging.level_filter());

    log::info!("Starting overlay-console-demo, logging to {}", log_file.display());

    let mut app = App::new(&config, Some(log_file))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    log::info!(
        "Exiting overlay-console-demo after forwarding {} lines",
        app.stats().forwarded
    );
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if !app.running() {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick();
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    render::render_tree(&app.tree(), body, frame.buffer_mut());

    let key = Style::default().fg(Color::Yellow);
    let help = Line::from(vec![
        Span::styled(" ` ", key),
        Span::raw("console  "),
        Span::styled("c ", key),
        Span::raw("clear  "),
        Span::styled("s ", key),
        Span::raw("status  "),
        Span::styled("q ", key),
        Span::raw("quit"),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}
