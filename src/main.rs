// strucedit: structural editor driven by a replayable command log

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use strucedit::config::{EditorConfig, Loader};
use strucedit::editor::Editor;
use strucedit::storage::LogFile;
use strucedit::ui::App;

#[derive(Parser, Debug)]
#[command(name = "strucedit", version, about = "Structural editor with a replayable command log")]
struct Cli {
    /// Command log to open; created on first save if it does not exist
    log: Option<PathBuf>,

    /// Extra TOML configuration layered over the built-in defaults
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Spaces per nesting level, overriding the configuration
    #[arg(long)]
    indent_width: Option<usize>,

    /// Replay the log, print the document as plain text and exit
    #[arg(long)]
    print: bool,
}

fn init_logging(config: &EditorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let file = File::create(&config.logging.file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if let Some(width) = cli.indent_width {
        loader = loader.set_override("editor.indent_width", width as i64)?;
    }
    let config = loader.build()?;

    if !cli.print {
        init_logging(&config)?;
    }

    let file = LogFile::new(
        cli.log
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.storage.suggested_name)),
    );

    let mut editor = Editor::new();
    if file.exists() {
        let text = file.load()?;
        editor.load_text(&text);
        tracing::info!(path = %file.path().display(), "opened log");
    } else if cli.print {
        eprintln!("Error: File '{}' not found", file.path().display());
        std::process::exit(1);
    }

    if cli.print {
        print!("{}", editor.render().to_plain_text(config.editor.indent_width));
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(editor, file, config.editor.indent_width);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
