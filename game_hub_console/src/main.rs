// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_config;
mod client_main;
mod network;
mod tui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, anyhow};
use clap::{ArgMatches, Command, arg, value_parser};
use itertools::Itertools;
use strum::IntoEnumIterator;

use client_config::ClientConfig;
use client_main::{LaunchTarget, SessionStart};
use game_hub::clobber_ai::{DEFAULT_SEARCH_DEPTH, Heuristic, MinimaxPlayer, round_robin};
use game_hub::hub::GameId;


fn main() -> anyhow::Result<()> {
    let matches = Command::new("Game hub")
        .version(clap::crate_version!())
        .about("Terminal hub for chess, Clobber and 5x5 tic-tac-toe")
        .arg(arg!(--server <address> "Game server address, host:port"))
        .arg(
            arg!(--config <file> "Path to the configuration file: yaml-serialized ClientConfig")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"log-file" <file> "Write logs to this file instead of stderr")
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(Command::new("hub").about("Choose a game from the list (default)"))
        .subcommand(remote_game_command("chess", "Play chess against a remote opponent"))
        .subcommand(
            remote_game_command("clobber", "Play Clobber against a remote opponent")
                .subcommand(Command::new("local").about("Play Clobber with two players on this terminal"))
                .subcommand(
                    search_depth_arg(
                        Command::new("ai").about("Play Clobber as black against the computer"),
                    )
                    .arg(arg!(--heuristic <name> "Position evaluation: material or adaptive")),
                )
                .subcommand(search_depth_arg(
                    Command::new("tournament")
                        .about("Let every computer heuristic play every other one and print the results"),
                )),
        )
        .subcommand(Command::new("tictactoe").about("Play 5x5 tic-tac-toe on this terminal"))
        .get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ClientConfig::from_yaml_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(server_address) = matches.get_one::<String>("server") {
        config.server_address = server_address.clone();
    }
    if let Some(log_file) = matches.get_one::<PathBuf>("log-file") {
        config.log_file = Some(log_file.clone());
    }
    init_logging(config.log_file.as_deref())?;

    let target = match matches.subcommand() {
        None | Some(("hub", _)) => LaunchTarget::Hub,
        Some(("chess", sub_matches)) => {
            LaunchTarget::Remote(GameId::Chess, session_start(sub_matches))
        }
        Some(("clobber", sub_matches)) => match sub_matches.subcommand() {
            Some(("local", _)) => LaunchTarget::LocalClobber { computer: None },
            Some(("ai", ai_matches)) => {
                LaunchTarget::LocalClobber { computer: Some(computer_player(ai_matches)?) }
            }
            Some(("tournament", tournament_matches)) => {
                run_tournament(search_depth(tournament_matches));
                return Ok(());
            }
            _ => LaunchTarget::Remote(GameId::Clobber, session_start(sub_matches)),
        },
        Some(("tictactoe", _)) => LaunchTarget::TicTacToe,
        _ => unreachable!("Exhausted list of subcommands"),
    };
    client_main::run(config, target)
}

fn remote_game_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(Command::new("new").about("Create a new game and wait for an opponent"))
        .subcommand(
            Command::new("join")
                .about("Join an existing game")
                .arg(arg!(<game_id> "Game ID shown to the player who created the game")),
        )
}

fn session_start(matches: &ArgMatches) -> SessionStart {
    match matches.subcommand() {
        Some(("join", sub_matches)) => {
            SessionStart::Join(sub_matches.get_one::<String>("game_id").unwrap().clone())
        }
        _ => SessionStart::New,
    }
}

fn search_depth_arg(command: Command) -> Command {
    command.arg(
        arg!(--depth <plies> "How many moves ahead the computer looks")
            .value_parser(value_parser!(u32).range(1..=6)),
    )
}

fn search_depth(matches: &ArgMatches) -> u32 {
    matches.get_one::<u32>("depth").copied().unwrap_or(DEFAULT_SEARCH_DEPTH)
}

fn computer_player(matches: &ArgMatches) -> anyhow::Result<MinimaxPlayer> {
    let heuristic = match matches.get_one::<String>("heuristic") {
        Some(name) => Heuristic::from_str(name).map_err(|_| {
            anyhow!("Unknown heuristic '{}', expected one of: {}", name, Heuristic::iter().join(", "))
        })?,
        None => MinimaxPlayer::default().heuristic,
    };
    Ok(MinimaxPlayer::new(search_depth(matches), heuristic))
}

fn run_tournament(depth: u32) {
    println!("Clobber computer players, search depth {}", depth);
    println!("{:<32} | winner", "black vs white");
    println!("{}", "-".repeat(56));
    for (black, white, result) in round_robin(depth) {
        let matchup = format!("{} vs {}", black, white);
        println!("{:<32} | {} in {} moves", matchup, result.winner, result.num_moves);
    }
}

// Without a log file, log lines go to stderr and overlap the game screen.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.parse_default_env().init();
    Ok(())
}
