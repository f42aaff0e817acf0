//! Battle Pets - command line entry point
//!
//! Runs a single battle or a full round-robin season, either from a TOML
//! game file or with a generated field of computer pets.

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use battle_pets::battle::run_battle;
use battle_pets::core::config::GameConfig;
use battle_pets::core::error::Result;
use battle_pets::core::types::ContenderId;
use battle_pets::pet::Roster;
use battle_pets::player::ConsoleDecisions;
use battle_pets::progress::{ConsoleSink, NullSink, ProgressSink, TracingSink};
use battle_pets::season::run_season;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Battle Pets - turn-based pet combat
#[derive(Parser, Debug)]
#[command(name = "battle-pets")]
#[command(about = "Run pet battles and round-robin seasons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// All pets fight each other for the configured number of fights
    Battle(RunArgs),
    /// Every pair of pets meets once in a battle
    Season(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// TOML game file; without it a field of computer pets is generated
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Number of generated pets when no game file is given
    #[arg(long, default_value_t = 4)]
    pets: usize,

    /// Random seed (overrides the game file)
    #[arg(long)]
    seed: Option<u64>,

    /// Fights per battle (overrides the game file)
    #[arg(long)]
    fights: Option<u32>,

    /// Print the result as JSON on stdout; progress goes to the log
    #[arg(long)]
    json: bool,

    /// No progress output
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("battle_pets=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Battle(args) => run(&args, Mode::Battle),
        Command::Season(args) => run(&args, Mode::Season),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Battle,
    Season,
}

fn load_config(args: &RunArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path)?,
        None => GameConfig::demo(args.pets, args.seed.unwrap_or_else(rand::random)),
    };
    if let Some(seed) = args.seed {
        config.settings.seed = seed;
    }
    if let Some(fights) = args.fights {
        config.settings.fights_per_battle = fights;
    }
    Ok(config)
}

/// Human pets all read from one locked stdin
fn build_roster(config: &GameConfig) -> Result<(Roster, Vec<ContenderId>)> {
    let console = Rc::new(RefCell::new(io::stdin().lock()));
    config.build_roster(|_| Box::new(ConsoleDecisions::shared(Rc::clone(&console), io::stdout())))
}

fn run(args: &RunArgs, mode: Mode) -> Result<()> {
    let config = load_config(args)?;
    let settings = config.settings()?;
    let (mut roster, ids) = build_roster(&config)?;
    let mut rng = settings.rng();

    tracing::info!(
        pets = ids.len(),
        fights = settings.fights_per_battle(),
        seed = settings.seed(),
        ?mode,
        "starting"
    );

    let mut sink: Box<dyn ProgressSink> = if args.quiet {
        Box::new(NullSink)
    } else if args.json {
        Box::new(TracingSink)
    } else {
        Box::new(ConsoleSink)
    };

    match mode {
        Mode::Battle => {
            let battle = run_battle(
                &ids,
                settings.fights_per_battle(),
                &mut roster,
                &mut rng,
                sink.as_mut(),
            )?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&battle)?);
            }
        }
        Mode::Season => {
            let season = run_season(
                &ids,
                settings.fights_per_battle(),
                &mut roster,
                &mut rng,
                sink.as_mut(),
            )?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&season)?);
            }
        }
    }

    Ok(())
}
