mod ui;

use bloom::{
    config::{Config, ConfigStore, FileConfigStore},
    pomodoro::Pomodoro,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    theme::Theme,
    util::format_time_for_title,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_INTERVAL_MS: u64 = 1000;
const APP_TITLE: &str = "bloom";

/// Set-time presets behind --dev, in seconds, on keys 1 through 4
const DEV_PRESETS: [u32; 4] = [5, 10, 30, 60];

/// pixel-garden pomodoro timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A pomodoro timer that grows a pixel-art scene as you focus. Work sessions cycle into short breaks, with a long break every few cycles; the garden blooms as the clock runs down."
)]
pub struct Cli {
    /// work session length in seconds
    #[clap(short = 'w', long)]
    work_secs: Option<u32>,

    /// short break length in seconds
    #[clap(short = 's', long)]
    short_break_secs: Option<u32>,

    /// long break length in seconds
    #[clap(short = 'l', long)]
    long_break_secs: Option<u32>,

    /// work sessions before a long break
    #[clap(short = 'c', long)]
    cycles: Option<u32>,

    /// pixel theme to grow; pins the theme instead of a random pick per session
    #[clap(short = 't', long)]
    theme: Option<String>,

    /// shrink the default durations and enable the set-time keys for quick demos
    #[clap(long)]
    dev: bool,
}

impl Cli {
    /// Layer the saved config under the CLI flags. Dev mode swaps in short
    /// baseline durations first, so explicit flags still win.
    fn resolve_config(&self, saved: &Config) -> Config {
        let base = if self.dev {
            Config {
                work_secs: 10,
                short_break_secs: 10,
                long_break_secs: 15,
                cycles_before_long_break: 4,
                theme: saved.theme.clone(),
            }
        } else {
            saved.clone()
        };

        Config {
            work_secs: self.work_secs.unwrap_or(base.work_secs),
            short_break_secs: self.short_break_secs.unwrap_or(base.short_break_secs),
            long_break_secs: self.long_break_secs.unwrap_or(base.long_break_secs),
            cycles_before_long_break: self.cycles.unwrap_or(base.cycles_before_long_break),
            theme: self.theme.clone().or(base.theme),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub pomodoro: Pomodoro,
    pub theme: Theme,
    /// Manually chosen theme; suppresses the random pick on new sessions.
    pub theme_pinned: bool,
    pub dev_mode: bool,
}

impl App {
    pub fn new(config: &Config, dev_mode: bool) -> Self {
        let pinned = config.theme.as_deref().and_then(Theme::by_id);
        let (theme, theme_pinned) = match pinned {
            Some(theme) => (theme, true),
            None => (Theme::random(), false),
        };

        Self {
            pomodoro: Pomodoro::new(config.durations()),
            theme,
            theme_pinned,
            dev_mode,
        }
    }

    /// Start/Resume while stopped, Pause while running. On the finished
    /// frame it lands the pending phase change instead, so a countdown is
    /// never armed with nowhere to go.
    pub fn primary_action(&mut self) {
        if self.pomodoro.session_finished() {
            self.advance_session();
        } else if self.pomodoro.is_running() {
            self.pomodoro.pause();
        } else {
            self.pomodoro.start();
        }
    }

    /// One beat of the clock. A finished countdown has already had its
    /// zero-remaining frame drawn by now, so it advances to the next phase;
    /// otherwise the second is counted down.
    pub fn on_tick(&mut self) {
        if self.pomodoro.session_finished() {
            self.advance_session();
        } else {
            self.pomodoro.on_tick();
        }
    }

    pub fn reset(&mut self) {
        self.pomodoro.reset();
    }

    pub fn skip_break(&mut self) {
        if !self.pomodoro.phase.is_break() {
            return;
        }
        self.pomodoro.skip_break();
        self.refresh_theme();
    }

    pub fn next_theme(&mut self) {
        self.theme = Theme::after(&self.theme.id);
        self.theme_pinned = true;
    }

    pub fn set_time(&mut self, seconds: u32) {
        self.pomodoro.set_time(seconds);
    }

    pub fn title(&self) -> String {
        if self.pomodoro.is_running() {
            format_time_for_title(self.pomodoro.time_remaining, self.pomodoro.phase)
        } else {
            APP_TITLE.to_string()
        }
    }

    fn advance_session(&mut self) {
        let was_break = self.pomodoro.phase.is_break();
        self.pomodoro.complete_session();
        if was_break {
            // A fresh work session gets a fresh surprise scene
            self.refresh_theme();
        }
    }

    fn refresh_theme(&mut self) {
        if !self.theme_pinned {
            self.theme = Theme::random();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = cli.resolve_config(&FileConfigStore::new().load());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, cli.dev);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, SetTitle(""))?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_INTERVAL_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        execute!(io::stdout(), SetTitle(app.title()))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one keypress; returns true when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char(' ') => app.primary_action(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('k') => app.skip_break(),
        KeyCode::Char('t') => app.next_theme(),
        KeyCode::Char(c @ '1'..='4') if app.dev_mode => {
            let preset = DEV_PRESETS[c as usize - '1' as usize];
            app.set_time(preset);
        }
        _ => {}
    }

    false
}
