use actiontui::config::Config;
use actiontui::core::Suggestions;
use actiontui::tui::components::BuiltinCodeViewerProvider;
use actiontui::tui::ActionList;
use clap::{Parser, ValueEnum};
use color_eyre::{eyre::eyre, Result};
use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Review suggested data-transformation actions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Suggestions file (JSON with `features` and `actions`)
    #[arg(long = "suggestions", value_name = "PATH")]
    suggestions: PathBuf,
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write the reviewed actions here on exit
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    actiontui::logging::init_with(None, args.logging.map(Into::into))?;

    let cfg = match Config::from_path(args.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Failed to load config, using defaults: {e}");
            Config::default()
        }
    };
    let keybindings = cfg.keybindings()?;

    let suggestions = Suggestions::load(&args.suggestions)?;
    info!(
        actions = suggestions.actions.len(),
        features = suggestions.features.len(),
        "loaded suggestions from {}",
        args.suggestions.display()
    );

    let provider = BuiltinCodeViewerProvider {
        max_lines: cfg.code_max_lines,
    };
    let mut list = ActionList::new(suggestions, cfg.style(), keybindings)
        .with_show_idx(cfg.show_idx)
        .with_border(cfg.border)
        .with_code_viewer(Arc::new(provider));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut list);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    if let Err(e) = res {
        error!("Error: {e}");
        return Err(eyre!("{e:#}"));
    }

    if let Some(output) = args.output {
        let reviewed = Suggestions {
            actions: list.actions(),
            ..Suggestions::load(&args.suggestions)?
        };
        std::fs::write(&output, serde_json::to_string_pretty(&reviewed)?)?;
        info!("wrote reviewed actions to {}", output.display());
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    list: &mut ActionList,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| list.render(f, f.area()))?;

        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key_event) = event::read()? {
                if let Err(e) = list.handle_key_event(key_event) {
                    error!("Error handling key event: {e}");
                }
            }
        }
        if list.should_quit() {
            break;
        }

        if let Err(e) = list.update() {
            error!("Error during tick update: {e}");
        }
    }
    Ok(())
}
