mod config;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tictactoe_common::config::Validate;
use tictactoe_common::games::tictactoe::{
    simulate, DecisionTable, FirstPlayerMode, Strategy, TicTacToeSession,
};
use tictactoe_common::{log, log_warn, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use config::{get_config_manager, GameConfig};
use terminal::{parse_input, InputCommand, TerminalRenderer, HELP_TEXT};

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    /// YAML config, defaults to the file next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    strategy: Option<Strategy>,
    #[arg(long)]
    seed: Option<u64>,
    /// human, opponent or random
    #[arg(long)]
    first: Option<FirstPlayerMode>,
    /// JSON decision table for the `table` strategy.
    #[arg(long)]
    table: Option<PathBuf>,
    #[arg(long)]
    log_prefix: Option<String>,
    #[arg(long)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Play against the computer in the terminal.
    Play,
    /// Pit the configured strategy against a rival and print the tally.
    Simulate {
        #[arg(long, default_value_t = 1000)]
        games: u32,
        #[arg(long, default_value = "random")]
        rival: Strategy,
    },
}

impl Args {
    fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(first) = self.first {
            config.first_player = first;
        }
        if let Some(ref table) = self.table {
            config.decision_table = Some(table.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_logger(args.log_prefix.clone(), args.debug);

    let mut config_manager = get_config_manager(args.config.clone());
    let config = args.apply_overrides(config_manager.get_config()?);
    config.validate()?;

    match args.command.unwrap_or(Command::Play) {
        Command::Play => play(config).await?,
        Command::Simulate { games, rival } => run_simulation(&config, games, rival),
    }
    Ok(())
}

async fn play(config: GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", HELP_TEXT);
    let (handle, session) = TicTacToeSession::start(
        config.session_settings(),
        config.session_rng(),
        TerminalRenderer::new(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let delivered = match parse_input(&line) {
            Ok(InputCommand::Cell(index)) => handle.cell_activated(index),
            Ok(InputCommand::Restart) => handle.restart(),
            Ok(InputCommand::Jump(move_number)) => handle.jump_to(move_number),
            Ok(InputCommand::Help) => {
                println!("{}", HELP_TEXT);
                true
            }
            Ok(InputCommand::Quit) => break,
            Err(message) => {
                println!("{}", message);
                true
            }
        };
        if !delivered {
            break;
        }
    }

    handle.shutdown();
    let coordinator = session.await?;
    log!(
        "Leaving {} after {} moves",
        coordinator.game_id(),
        coordinator.record().move_count()
    );
    Ok(())
}

fn run_simulation(config: &GameConfig, games: u32, rival: Strategy) {
    let table = config
        .decision_table
        .as_deref()
        .and_then(|path| match DecisionTable::load(path) {
            Ok(table) => Some(table),
            Err(e) => {
                log_warn!("{}; simulating with heuristics only", e);
                None
            }
        });

    let mut rng = config.session_rng();
    log!(
        "Simulating {} games of {} against {} (seed {})",
        games,
        config.strategy,
        rival,
        rng.seed()
    );
    let tally = simulate(games, config.strategy, rival, &mut rng, table.as_ref());
    println!("{} vs {}: {}", config.strategy, rival, tally);
}
