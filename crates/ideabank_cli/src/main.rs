//! Interactive console for IdeaBank.
//!
//! # Responsibility
//! - Own all prompting, confirmation phrases and display formatting.
//! - Wire credentials, database bootstrap and the repository together.
//!
//! # Invariants
//! - Every repository error is displayed and re-prompted, never panicked on.
//! - Destructive bulk operations require explicit confirmation.

use clap::Parser;
use ideabank_core::db::open_db;
use ideabank_core::{
    default_log_level, init_logging, CredentialStore, DbCredentials, FileCredentialStore, Idea,
    IdeaId, IdeaRepository, SqliteIdeaStore,
};
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod format;

/// Console idea manager with persistent database credentials.
#[derive(Debug, Parser)]
#[command(name = "ideabank", version)]
struct Cli {
    /// Directory holding database files. Defaults to the user data dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory for rolling log files. Defaults to `<data-dir>/logs`.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,
}

enum MenuOutcome {
    /// Leave the session and return to the login loop.
    Logout,
    /// Terminate the whole program.
    Exit,
}

fn main() {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join("ideabank")))
        .unwrap_or_else(|| PathBuf::from("."));
    let log_dir = cli.log_dir.unwrap_or_else(|| data_dir.join("logs"));
    let log_level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());

    // Logging failure must not block an interactive session.
    if let Some(log_dir_str) = log_dir.to_str() {
        if let Err(message) = init_logging(&log_level, log_dir_str) {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    if let Err(err) = run(&data_dir) {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

fn run(data_dir: &Path) -> io::Result<()> {
    let credential_store = FileCredentialStore::new(
        dirs::config_dir()
            .map(|dir| dir.join("ideabank"))
            .unwrap_or_else(|| data_dir.to_path_buf()),
    );

    let mut force_manual_login = false;

    loop {
        let mut credentials = None;

        if !force_manual_login {
            match credential_store.load() {
                Ok(Some(saved)) => {
                    println!("Found saved credentials. Attempting automatic login...");
                    credentials = Some(saved);
                }
                Ok(None) => {}
                Err(err) => println!("Could not read saved credentials: {err}"),
            }
        }

        let credentials = match credentials {
            Some(saved) => saved,
            None => match prompt_for_credentials()? {
                Some(entered) => entered,
                None => return Ok(()),
            },
        };
        force_manual_login = false;

        // The SQLite engine keys the database file off the logical database
        // name; server/port/username travel in the credential blob for
        // engines that need a network login.
        let db_path = data_dir.join(format!("{}.db", credentials.database));
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = match open_db(&db_path) {
            Ok(conn) => {
                info!("event=session_login module=cli status=ok");
                conn
            }
            Err(err) => {
                println!("Failed to connect to database: {err}");
                println!("Press Enter to retry login...");
                let _ = read_line()?;
                force_manual_login = true;
                continue;
            }
        };

        if !credential_store.exists()
            && prompt_yes_no("Would you like to save these credentials? (y/n): ")?
        {
            match credential_store.save(&credentials) {
                Ok(()) => println!("Credentials saved successfully."),
                Err(err) => println!("Failed to save credentials: {err}"),
            }
        }

        let store = match SqliteIdeaStore::try_new(&conn) {
            Ok(store) => store,
            Err(err) => {
                println!("Failed to prepare database: {err}");
                force_manual_login = true;
                continue;
            }
        };
        let mut repository = IdeaRepository::new(store);

        match capture_loop(&mut repository, &credential_store)? {
            MenuOutcome::Exit => {
                info!("event=session_end module=cli status=ok reason=exit");
                return Ok(());
            }
            MenuOutcome::Logout => {
                info!("event=session_end module=cli status=ok reason=logout");
                force_manual_login = true;
            }
        }
    }
}

/// Quick-capture prompt: free text creates an idea, keywords navigate.
fn capture_loop(
    repository: &mut IdeaRepository<SqliteIdeaStore<'_>>,
    credential_store: &FileCredentialStore,
) -> io::Result<MenuOutcome> {
    loop {
        println!("\nEnter your idea (type 'EDIT' for main menu, 'EXIT' to close program):");
        let input = read_line()?;

        if input.trim().is_empty() {
            println!("Idea content cannot be empty");
            continue;
        }

        match input.trim().to_uppercase().as_str() {
            "EDIT" => {
                if let Some(outcome) = run_main_menu(repository, credential_store)? {
                    return Ok(outcome);
                }
            }
            "EXIT" => return Ok(MenuOutcome::Exit),
            _ => match repository.create_idea(input.trim()) {
                Ok(idea) => println!("Idea created with ID: {}", idea.id),
                Err(err) => println!("Failed to create idea: {err}"),
            },
        }
    }
}

fn run_main_menu(
    repository: &mut IdeaRepository<SqliteIdeaStore<'_>>,
    credential_store: &FileCredentialStore,
) -> io::Result<Option<MenuOutcome>> {
    loop {
        println!("\nIdea Management System");
        println!("1. Create new idea");
        println!("2. View all ideas");
        println!("3. Update idea");
        println!("4. Delete idea");
        println!("5. Reorder all IDs");
        println!("6. Remove all ideas");
        println!("7. Logout");
        println!("8. Exit");
        print!("Select an option: ");
        io::stdout().flush()?;

        match read_line()?.trim() {
            "1" => create_idea(repository)?,
            "2" => view_all_ideas(repository)?,
            "3" => update_idea(repository)?,
            "4" => delete_idea(repository)?,
            "5" => reorder_all_ids(repository)?,
            "6" => remove_all_ideas(repository)?,
            "7" => {
                if prompt_yes_no("Would you like to remove saved credentials? (y/n): ")? {
                    match credential_store.remove() {
                        Ok(true) => println!("Credentials removed successfully."),
                        Ok(false) => println!("No saved credentials to remove."),
                        Err(err) => println!("Failed to remove credentials: {err}"),
                    }
                }
                return Ok(Some(MenuOutcome::Logout));
            }
            "8" => return Ok(Some(MenuOutcome::Exit)),
            _ => println!("Invalid option"),
        }
    }
}

fn create_idea(repository: &mut IdeaRepository<SqliteIdeaStore<'_>>) -> io::Result<()> {
    print!("Enter your idea: ");
    io::stdout().flush()?;
    let content = read_line()?;
    match repository.create_idea(content.trim()) {
        Ok(idea) => println!("Idea created with ID: {}", idea.id),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn view_all_ideas(repository: &mut IdeaRepository<SqliteIdeaStore<'_>>) -> io::Result<()> {
    match repository.get_all_ideas() {
        Ok(ideas) if ideas.is_empty() => println!("No ideas found"),
        Ok(ideas) => {
            for idea in ideas {
                print_idea(&idea);
                println!("------------------------");
            }
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn update_idea(repository: &mut IdeaRepository<SqliteIdeaStore<'_>>) -> io::Result<()> {
    print!("Enter idea ID to update: ");
    io::stdout().flush()?;
    let Some(id) = parse_id(&read_line()?) else {
        println!("Invalid ID format");
        return Ok(());
    };

    let idea = match repository.get_idea(id) {
        Ok(Some(idea)) => idea,
        Ok(None) => {
            println!("Idea with ID {id} does not exist.");
            if prompt_yes_no("Would you like to create a new idea with this ID? (y/n): ")? {
                print!("Enter idea content: ");
                io::stdout().flush()?;
                let content = read_line()?;
                match repository.create_idea_with_id(id, content.trim()) {
                    Ok(_) => println!("New idea created with ID: {id}"),
                    Err(err) => println!("{err}"),
                }
            }
            return Ok(());
        }
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    loop {
        println!("\nCurrent idea details:");
        print_idea(&idea);
        println!("\nOptions:");
        println!("(C)ancel - Cancel update");
        println!("(E)dit - Edit content");
        println!("(R)eidentify - Change idea ID");
        print!("\nSelect an option: ");
        io::stdout().flush()?;

        match read_line()?.trim().to_lowercase().as_str() {
            "c" => return Ok(()),
            "e" => {
                print!("Enter new content: ");
                io::stdout().flush()?;
                let new_content = read_line()?;
                match repository.update_content(id, new_content.trim()) {
                    Ok(_) => {
                        println!("Content updated successfully");
                        return Ok(());
                    }
                    Err(err) => println!("{err}"),
                }
            }
            "r" => {
                print!("Enter new ID: ");
                io::stdout().flush()?;
                let Some(new_id) = parse_id(&read_line()?) else {
                    println!("Invalid ID format");
                    continue;
                };
                match repository.reidentify(id, new_id) {
                    Ok(_) => {
                        println!("ID updated successfully");
                        return Ok(());
                    }
                    Err(err) => println!("{err}"),
                }
            }
            _ => println!("Invalid option"),
        }
    }
}

fn delete_idea(repository: &mut IdeaRepository<SqliteIdeaStore<'_>>) -> io::Result<()> {
    print!("Enter idea ID to delete: ");
    io::stdout().flush()?;
    let Some(id) = parse_id(&read_line()?) else {
        println!("Invalid ID format");
        return Ok(());
    };

    match repository.delete_idea(id) {
        Ok(()) => println!("Idea deleted successfully"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn reorder_all_ids(repository: &mut IdeaRepository<SqliteIdeaStore<'_>>) -> io::Result<()> {
    println!("\nReorder IDs Operation");
    println!("This will reorganize all idea IDs sequentially based on creation order.");
    println!("For example:");
    println!("Current IDs:  1, 2, 4, 7");
    println!("New IDs:      1, 2, 3, 4");
    if !prompt_yes_no("\nAre you sure you want to reorder all IDs? (y/n): ")? {
        println!("Reorder operation cancelled.");
        return Ok(());
    }

    match repository.reorder_ids() {
        Ok(count) => println!("All IDs have been successfully reordered ({count} ideas)."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn remove_all_ideas(repository: &mut IdeaRepository<SqliteIdeaStore<'_>>) -> io::Result<()> {
    println!("\nRemove All Ideas");
    println!("This will permanently delete ALL ideas from the database.");
    println!("This action cannot be undone!");
    print!("\nAre you sure you want to remove all ideas? (yes/no): ");
    io::stdout().flush()?;
    if read_line()?.trim().to_lowercase() != "yes" {
        println!("Operation cancelled.");
        return Ok(());
    }

    print!("\nPlease type 'CONFIRM' to proceed: ");
    io::stdout().flush()?;
    if read_line()?.trim() != "CONFIRM" {
        println!("Operation cancelled.");
        return Ok(());
    }

    match repository.remove_all() {
        Ok(()) => println!("All ideas have been successfully removed."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn prompt_for_credentials() -> io::Result<Option<DbCredentials>> {
    println!("Database Login");

    print!("Server: ");
    io::stdout().flush()?;
    let server = read_line()?.trim().to_string();

    print!("Port: ");
    io::stdout().flush()?;
    let port = read_line()?.trim().parse::<u16>().unwrap_or(3306);

    print!("Database: ");
    io::stdout().flush()?;
    let database = read_line()?.trim().to_string();
    if database.is_empty() {
        println!("Database name cannot be empty");
        return Ok(None);
    }

    print!("Username: ");
    io::stdout().flush()?;
    let username = read_line()?.trim().to_string();

    print!("Password: ");
    io::stdout().flush()?;
    let password = read_line()?.trim_end_matches(['\r', '\n']).to_string();

    Ok(Some(DbCredentials {
        server,
        port,
        database,
        username,
        password,
    }))
}

fn print_idea(idea: &Idea) {
    println!("ID: {}", idea.id);
    println!("Content: {}", idea.content);
    println!("Created: {}", format::epoch_ms_to_utc(idea.created_at));
    println!("Modified: {}", format::epoch_ms_to_utc(idea.updated_at));
}

fn prompt_yes_no(prompt: &str) -> io::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    Ok(read_line()?.trim().eq_ignore_ascii_case("y"))
}

fn parse_id(input: &str) -> Option<IdeaId> {
    input.trim().parse::<IdeaId>().ok()
}

fn read_line() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer)
}
