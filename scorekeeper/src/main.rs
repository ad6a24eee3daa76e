use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context as _, eyre};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};
use tracing_tree::HierarchicalLayer;

use scala40::cli::actions;
use scala40::cli::config::CliConfig;
use scala40::cli::output::{self, OutputFormat};
use scala40::{FileStore, Notice, ScoreKeeper};

const LONG_ABOUT: &str = "Keeps the score of a Scala 40 game among 2 to 6 players.\n\n\
Every player collects penalty points. Whoever reaches the losing threshold \
(150 by default) loses; the player with the lowest score leads.\n\n\
Players can be referred to by id, by position (1-6) or by name.";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (rustc ",
    env!("VERGEN_RUSTC_SEMVER"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "scala40")]
#[command(about = "Scala 40 score keeper", long_about = LONG_ABOUT)]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// Directory holding the saved game
    #[arg(long, global = true, env = "SCALA40_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Output format: json or human (detected from the terminal when omitted)
    #[arg(long, global = true)]
    format: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Game(GameCommands),
    /// CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum GameCommands {
    /// Show the scoreboard
    Show,
    /// Add a player to the table
    Add {
        /// Name of the new player
        name: String,
    },
    /// Remove a player from the table
    Remove {
        /// Player id, position or name
        player: String,
    },
    /// Rename a player
    Rename {
        /// Player id, position or name
        player: String,
        /// New name
        name: String,
    },
    /// Add points to a player (-5, -1, +1, +5, +10 or +20)
    Score {
        /// Player id, position or name
        player: String,
        /// Points to add; negative values subtract
        #[arg(allow_negative_numbers = true)]
        delta: i32,
        /// Accept any number of points, not just the preset ones
        #[arg(long)]
        custom: bool,
    },
    /// Reset every score to zero
    Reset,
    /// Show or change the losing threshold (50-500)
    Threshold {
        /// New threshold
        #[arg(allow_negative_numbers = true)]
        value: Option<i64>,
    },
    /// Show the current leader
    Leader,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the active configuration
    Show,
    /// Store the directory games are saved in
    SetDataDir {
        /// Directory path
        path: PathBuf,
    },
    /// Store the default output format
    SetFormat {
        /// json or human
        format: String,
    },
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    setup_tracing()?;

    let cli = Cli::parse();
    let config = CliConfig::load()?;

    let format = OutputFormat::from_flag(cli.format.as_deref().or(config.format.as_deref()))
        .map_err(|e| eyre!(e))?;

    match (run(cli, config, format), format) {
        (Ok(()), _) => Ok(ExitCode::SUCCESS),
        (Err(err), OutputFormat::Json) => {
            output::print_json_error(&format!("{err:#}"));
            Ok(ExitCode::FAILURE)
        }
        (Err(err), OutputFormat::Human) => Err(err),
    }
}

fn setup_tracing() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true),
        )
        .try_init()
        .wrap_err("Failed to initialize tracing")?;

    Ok(())
}

fn run(cli: Cli, config: CliConfig, format: OutputFormat) -> color_eyre::Result<()> {
    match cli.command.unwrap_or(Commands::Game(GameCommands::Show)) {
        Commands::Game(command) => handle_game_command(command, cli.data_dir, config, format),
        Commands::Config { command } => handle_config_command(command, config, format),
    }
}

fn handle_game_command(
    command: GameCommands,
    data_dir: Option<PathBuf>,
    config: CliConfig,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "Opening saved game");

    let mut keeper = ScoreKeeper::load(FileStore::new(&data_dir))
        .wrap_err_with(|| format!("Failed to load the game from {}", data_dir.display()))?;

    let notices = match command {
        GameCommands::Show => Vec::new(),
        GameCommands::Add { name } => keeper.add_player(&name)?,
        GameCommands::Remove { player } => {
            let id = actions::resolve_id(&keeper, &player);
            keeper.remove_player(&id)?
        }
        GameCommands::Rename { player, name } => {
            let id = actions::resolve_id(&keeper, &player);
            keeper.rename_player(&id, &name)?
        }
        GameCommands::Score {
            player,
            delta,
            custom,
        } => actions::score(&mut keeper, &player, delta, custom)?,
        GameCommands::Reset => keeper.reset_scores()?,
        GameCommands::Threshold { value: Some(value) } => keeper.set_max_score(value)?,
        GameCommands::Threshold { value: None } => Vec::new(),
        GameCommands::Leader => return print_leader(&keeper, format),
    };

    report(&keeper, &notices, format)
}

fn report(
    keeper: &ScoreKeeper<FileStore>,
    notices: &[Notice],
    format: OutputFormat,
) -> color_eyre::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "notices": notices,
                "game": keeper.tracker().to_api_format(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Human => {
            output::print_notices(notices);
            if !notices.is_empty() {
                println!();
            }
            output::print_scoreboard(keeper.tracker());
        }
    }
    Ok(())
}

fn print_leader(keeper: &ScoreKeeper<FileStore>, format: OutputFormat) -> color_eyre::Result<()> {
    let tracker = keeper.tracker();
    let leader = tracker.leader();
    let losers = tracker.losers();

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "leader": leader,
                "gameOver": tracker.is_game_over(),
                "losers": losers,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Human => {
            if !losers.is_empty() {
                let names: Vec<&str> = losers.iter().map(|p| p.name.as_str()).collect();
                output::print_field("Lost", &names.join(", "));
            }
            match leader {
                Some(player) => output::print_field(
                    "Leader",
                    &format!("{} ({} points)", player.name, player.score),
                ),
                None => println!("No players at the table."),
            }
        }
    }
    Ok(())
}

fn handle_config_command(
    command: ConfigCommands,
    mut config: CliConfig,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    match command {
        ConfigCommands::Show => {
            let path = CliConfig::config_path()?;
            let data_dir = config.data_dir()?;
            match format {
                OutputFormat::Json => {
                    let body = serde_json::json!({
                        "config_path": path,
                        "data_dir": data_dir,
                        "format": config.format,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                OutputFormat::Human => {
                    output::print_field("Config file", &path.display().to_string());
                    output::print_field("Data directory", &data_dir.display().to_string());
                    output::print_field("Format", config.format.as_deref().unwrap_or("auto"));
                }
            }
        }
        ConfigCommands::SetDataDir { path } => {
            config.data_dir = Some(path);
            config.save()?;
            println!("Data directory saved.");
        }
        ConfigCommands::SetFormat { format: new_format } => {
            OutputFormat::from_flag(Some(&new_format)).map_err(|e| eyre!(e))?;
            config.format = Some(new_format);
            config.save()?;
            println!("Output format saved.");
        }
    }
    Ok(())
}
