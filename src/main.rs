use hackscreen::app::{HackerScreen, ScreenOptions};
use hackscreen::config::{self, Invocation};
use hackscreen::tui::event_loop::{self, CrosstermEvents, LoopExit};
use hackscreen::tui::terminal_guard::TerminalGuard;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Instant;

mod logging;

fn main() -> ExitCode {
    let invocation = match config::parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("hackscreen: {err}");
            eprint!("{}", config::USAGE);
            return ExitCode::from(2);
        }
    };
    let cli = match invocation {
        Invocation::Help => {
            print!("{}", config::USAGE);
            return ExitCode::SUCCESS;
        }
        Invocation::ListThemes => {
            print!("{}", config::theme_listing());
            return ExitCode::SUCCESS;
        }
        Invocation::Run(cli) => cli,
    };

    let logging = logging::init();

    let settings_path = cli.settings.clone().or_else(config::settings_path);
    let mut settings = config::load_settings_or_default(settings_path.as_deref());
    settings.apply_cli(&cli);
    let options = settings.screen_options();

    match run(options) {
        Ok(exit) => {
            tracing::info!(code = exit.exit_code(), "exiting");
            ExitCode::from(exit.exit_code() as u8)
        }
        Err(err) => {
            tracing::error!(error = %err, "terminal session failed");
            eprintln!("hackscreen: {err}");
            if let Some(guard) = &logging {
                eprintln!("logs: {}", guard.log_dir().display());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(options: ScreenOptions) -> io::Result<LoopExit> {
    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signal_thread =
        hackscreen::tui::terminal_guard::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut screen = HackerScreen::new(options);
    screen.mount(Instant::now(), crossterm::terminal::size()?);
    let exit = event_loop::run(&mut terminal, &mut screen, &mut CrosstermEvents, &signal_rx);
    screen.unmount();

    drop(terminal);
    guard.restorer().restore()?;
    exit
}
