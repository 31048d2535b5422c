// rowdeck CLI - ingest sheets, search them, keep a derived todo list

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rowdeck_cli::app::AppState;
use rowdeck_remote::SheetsClient;
use rowdeck_store::Store;
use rowdeck_tasks::{TodoCommand, TodoStatus};

#[derive(Parser)]
#[command(name = "rowdeck")]
#[command(about = "Tabular ingestion, search, and sheet-derived todos")]
#[command(version)]
struct Cli {
    /// Override the data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a delimited text file or a workbook (xlsx/xls/xlsb/ods)
    Import { path: PathBuf },

    /// List sheets, or switch the active one
    Sheets {
        /// Make this sheet active
        #[arg(long = "use")]
        use_sheet: Option<String>,
    },

    /// Search the active sheet (blank query prints every row)
    Search {
        #[arg(default_value = "")]
        query: String,

        /// Candidate column names to search (repeatable); accent- and
        /// case-insensitive against headers
        #[arg(long = "field")]
        fields: Vec<String>,
    },

    /// Import from the remote sheet source
    Fetch {
        /// API base URL
        #[arg(long, env = "ROWDECK_API_BASE")]
        base_url: String,

        /// File to fetch; omit with --folder to take the newest file
        #[arg(long)]
        file_id: Option<String>,

        /// Folder to pick the most recently modified file from
        #[arg(long)]
        folder: Option<String>,

        /// Sheet to load (default: the file's first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Bearer token
        #[arg(long, env = "ROWDECK_TOKEN")]
        token: Option<String>,
    },

    /// Task list derived from the active sheet
    #[command(subcommand)]
    Todo(TodoCmd),

    /// Forget stored sheet state
    Clear,
}

#[derive(Subcommand)]
enum TodoCmd {
    /// Re-derive sheet todos from the active sheet's rows
    Sync,
    /// List todos
    List,
    /// Add a manual todo
    Add { text: String },
    /// Mark a todo done
    Done { id: String },
    /// Reopen a todo
    Reopen { id: String },
    /// Archive a todo
    Archive { id: String },
    /// Replace a todo's text
    Edit { id: String, text: String },
    /// Remove a todo
    Rm { id: String },
    /// Revert the last todo mutation
    Undo,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.data_dir {
        Some(dir) => Store::new(dir.clone()),
        None => Store::default_location(),
    };
    let mut app = AppState::load(store);

    match cli.command {
        Commands::Import { path } => match app.import_file(&path) {
            Ok(()) => {
                let names: Vec<&str> = app.sheets.sheet_names().collect();
                println!(
                    "Imported {} sheet(s): {}",
                    names.len(),
                    names.join(", ")
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                ExitCode::FAILURE
            }
        },

        Commands::Sheets { use_sheet } => {
            if let Some(name) = use_sheet {
                if !app.use_sheet(&name) {
                    eprintln!("No such sheet: {}", name);
                    return ExitCode::FAILURE;
                }
            }
            for name in app.sheets.sheet_names() {
                let marker = if app.sheets.active_sheet_name() == Some(name) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, name);
            }
            ExitCode::SUCCESS
        }

        Commands::Search { query, fields } => {
            let fields = if fields.is_empty() {
                AppState::default_fields()
            } else {
                vec![fields]
            };
            let headers = app
                .sheets
                .active_sheet()
                .map(|s| s.headers.clone())
                .unwrap_or_default();
            let rows = app.search(&query, &fields);

            if !headers.is_empty() {
                println!("{}", headers.join(" ; "));
            }
            for row in &rows {
                println!("{}", row.values().join(" ; "));
            }
            println!("{} row(s)", rows.len());
            ExitCode::SUCCESS
        }

        Commands::Fetch {
            base_url,
            file_id,
            folder,
            sheet,
            token,
        } => {
            let client = SheetsClient::new(base_url, token);

            let file_id = match (file_id, folder) {
                (Some(id), _) => id,
                (None, Some(folder)) => match client.list_files(&folder) {
                    Ok(files) => match files.first() {
                        Some(newest) => {
                            println!("Using newest file: {} ({})", newest.name, newest.id);
                            newest.id.clone()
                        }
                        None => {
                            eprintln!("Folder is empty");
                            return ExitCode::FAILURE;
                        }
                    },
                    Err(e) => {
                        eprintln!("Fetch failed: {}", e);
                        return ExitCode::FAILURE;
                    }
                },
                (None, None) => {
                    eprintln!("Pass --file-id or --folder");
                    return ExitCode::FAILURE;
                }
            };

            match app.import_remote(client, &file_id, sheet.as_deref()) {
                Ok(()) => {
                    println!(
                        "Loaded sheet: {}",
                        app.sheets.active_sheet_name().unwrap_or("(none)")
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    // Previous state is kept; surface the failure once.
                    eprintln!("Fetch failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Todo(cmd) => run_todo(&mut app, cmd),

        Commands::Clear => {
            app.clear_sheets();
            println!("Stored sheet state cleared");
            ExitCode::SUCCESS
        }
    }
}

fn run_todo(app: &mut AppState, cmd: TodoCmd) -> ExitCode {
    match cmd {
        TodoCmd::Sync => {
            app.sync_todos();
            println!("{} todo(s)", app.todos.todos().len());
            ExitCode::SUCCESS
        }
        TodoCmd::List => {
            for todo in app.todos.todos() {
                let mark = match todo.status {
                    TodoStatus::Pending => " ",
                    TodoStatus::Done => "x",
                    TodoStatus::Archived => "-",
                };
                println!("[{}] {}  {}", mark, todo.id, todo.text);
            }
            ExitCode::SUCCESS
        }
        TodoCmd::Add { text } => done_or_fail(app.todo(TodoCommand::Add { text })),
        TodoCmd::Done { id } => done_or_fail(app.todo(TodoCommand::SetStatus {
            id,
            status: TodoStatus::Done,
        })),
        TodoCmd::Reopen { id } => done_or_fail(app.todo(TodoCommand::SetStatus {
            id,
            status: TodoStatus::Pending,
        })),
        TodoCmd::Archive { id } => done_or_fail(app.todo(TodoCommand::SetStatus {
            id,
            status: TodoStatus::Archived,
        })),
        TodoCmd::Edit { id, text } => done_or_fail(app.todo(TodoCommand::Edit {
            id,
            new_text: text,
        })),
        TodoCmd::Rm { id } => done_or_fail(app.todo(TodoCommand::Remove { id })),
        TodoCmd::Undo => match app.undo_todo() {
            Some(label) => {
                println!("Undid: {}", label);
                ExitCode::SUCCESS
            }
            None => {
                println!("Nothing to undo");
                ExitCode::SUCCESS
            }
        },
    }
}

fn done_or_fail(applied: bool) -> ExitCode {
    if applied {
        ExitCode::SUCCESS
    } else {
        eprintln!("No todo with that id");
        ExitCode::FAILURE
    }
}
