mod app;
mod domain;
mod input;
mod persistence;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    db_file, init_local_slate, load_metadata, meta_file, save_metadata, AppMetadata, Database,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "slate")]
#[command(about = "A small terminal to-do list with local SQLite storage", long_about = None)]
struct Cli {
    /// Path to the task database (defaults to the slate data directory)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .slate directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let slate_dir = init_local_slate()?;
            println!("Initialized slate directory: {}", slate_dir.display());
            println!();
            println!("Slate will now use this local directory for task storage.");
            println!("Run 'slate' to start tracking tasks.");
            Ok(())
        }
        None => run_tui(cli.db),
    }
}

fn run_tui(db_override: Option<PathBuf>) -> Result<()> {
    let db_path = match db_override {
        Some(path) => path,
        None => db_file()?,
    };
    let db = Database::open(&db_path)?;
    eprintln!("Using task database: {}", db.path().display());

    // Restore the last selected filter
    let metadata = match meta_file() {
        Ok(path) => load_metadata(path).unwrap_or_default(),
        Err(_) => AppMetadata::default(),
    };

    let mut app = AppState::new(db, metadata.filter)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Remember the selected filter for next launch
    if let Ok(path) = meta_file() {
        let metadata = AppMetadata { filter: app.filter };
        if let Err(e) = save_metadata(path, &metadata) {
            eprintln!("Error saving metadata: {}", e);
        }
    }

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
