use clap::Parser;
use pixelpad::application::{list_notebooks, list_notes, ConfigService, OpenRepositoryService};
use pixelpad::cli::{
    format_color_change, format_config, format_note_list, format_notebook_list, Cli, Commands,
    NoteCommand, NotebookCommand,
};
use pixelpad::domain::Color;
use pixelpad::error::PixelpadError;
use pixelpad::infrastructure::{CreateNoteOptions, CreateNotebookOptions, NotesRepository};
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), PixelpadError> {
    let mut repository = NotesRepository::open_default()?;

    match cli.command {
        Some(Commands::Config { key, value, list }) => {
            let mut service = ConfigService::new(&mut repository);

            if list {
                print!("{}", format_config(&service.list()));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    let stored = service.set(&k, &v)?;
                    println!("Set {} = {}", k, stored);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: pixelpad config [--list | <key> [<value>]]");
                println!("Valid keys: repository, theme");
            }
            Ok(())
        }
        Some(Commands::Open) => {
            let root = OpenRepositoryService::new(&repository).execute()?;
            println!("Opened {}", root.display());
            Ok(())
        }
        Some(Commands::List { recent, notebooks }) => {
            if notebooks {
                let entries = list_notebooks(&mut repository)?;
                print_listing(&format_notebook_list(&entries));
            } else {
                let entries = list_notes(&mut repository, recent)?;
                print_listing(&format_note_list(&entries));
            }
            Ok(())
        }
        Some(Commands::Note { command }) => run_note(&mut repository, command),
        Some(Commands::Notebook { command }) => run_notebook(&mut repository, command),
        None => {
            println!("pixelpad - Notes repository manager");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn print_listing(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

fn run_note(repository: &mut NotesRepository, command: NoteCommand) -> Result<(), PixelpadError> {
    match command {
        NoteCommand::New {
            name,
            extension,
            directory,
            overwrite,
            color,
        } => {
            let options = CreateNoteOptions {
                directory,
                overwrite,
                color,
            };
            let path = repository.create_note(&name, &extension, options)?;
            println!("{}", path.display());
        }
        NoteCommand::Show { path } => {
            print!("{}", repository.load_note(&path)?);
        }
        NoteCommand::Save { path, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let path = repository.save_note(&path, &content)?;
            println!("Saved {}", path.display());
        }
        NoteCommand::Rename {
            path,
            new_name,
            overwrite,
        } => {
            let renamed = repository.rename_note(&path, &new_name, overwrite)?;
            println!("{}", renamed.display());
        }
        NoteCommand::Rm { path } => {
            repository.delete_note(&path)?;
            println!("Deleted {}", path.display());
        }
        NoteCommand::Color { path, color, clear } => {
            let color = parse_color(color, clear)?;
            repository.set_note_color(&path, color.as_ref().map(Color::as_str))?;
            println!("{}", format_color_change(&path, color.as_ref()));
        }
    }
    Ok(())
}

fn run_notebook(
    repository: &mut NotesRepository,
    command: NotebookCommand,
) -> Result<(), PixelpadError> {
    match command {
        NotebookCommand::New {
            name,
            parent,
            exist_ok,
            color,
        } => {
            let options = CreateNotebookOptions {
                parent,
                exist_ok,
                color,
            };
            let path = repository.create_notebook(&name, options)?;
            println!("{}", path.display());
        }
        NotebookCommand::Rename { path, new_name } => {
            let renamed = repository.rename_notebook(&path, &new_name)?;
            println!("{}", renamed.display());
        }
        NotebookCommand::Rm { path, recursive } => {
            repository.delete_notebook(&path, recursive)?;
            println!("Deleted {}", path.display());
        }
        NotebookCommand::Mv { path, target } => {
            let moved = repository.move_notebook(&path, &target)?;
            println!("{}", moved.display());
        }
        NotebookCommand::Color { path, color, clear } => {
            let color = parse_color(color, clear)?;
            repository.set_notebook_color(&path, color.as_ref().map(Color::as_str))?;
            println!("{}", format_color_change(&path, color.as_ref()));
        }
    }
    Ok(())
}

fn parse_color(color: Option<String>, clear: bool) -> Result<Option<Color>, PixelpadError> {
    if clear {
        return Ok(None);
    }
    color.as_deref().map(str::parse::<Color>).transpose()
}
