use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use waymark::app_state::AppState;
use waymark::commands;
use waymark::logging;
use waymark::repl::{parse_entity_id, readline};

#[derive(Parser)]
#[command(version, about = "waymark icon pipeline simulator")]
struct Args {
    /// Directory holding settings.toml, mod_alerts.txt and ignored_entities.txt
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let args = Args::parse();
    let config_dir = args
        .config_dir
        .or_else(waymark_core::config::default_config_dir)
        .ok_or("error: no config directory; pass --config-dir")?;
    let mut state = AppState::new(config_dir)?;

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut state) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue the entities of a scenario file
    Load {
        #[arg(short, long)]
        path: PathBuf,
    },
    Tick {
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
    AreaChange {
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Host removed an entity
    Remove {
        #[arg(long, value_parser = parse_entity_id)]
        id: u64,
    },
    LocalPlayer {
        #[arg(long, value_parser = parse_entity_id)]
        id: u64,
        #[arg(short, long)]
        name: String,
    },
    Icons,
    Stats,
    Reload,
    Exit,
}

fn respond(line: &str, state: &mut AppState) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "waymark".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Load { path }) => commands::load(state, &path)?,
        Some(Commands::Tick { count }) => commands::tick(state, count),
        Some(Commands::AreaChange { name }) => commands::area_change(state, name),
        Some(Commands::Remove { id }) => commands::remove(state, id),
        Some(Commands::LocalPlayer { id, name }) => commands::set_local_player(state, id, name),
        Some(Commands::Icons) => commands::show_icons(state),
        Some(Commands::Stats) => commands::show_stats(state),
        Some(Commands::Reload) => commands::reload(state)?,
        Some(Commands::Exit) => {
            write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
            std::io::stdout().flush().map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
