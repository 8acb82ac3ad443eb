#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Torus Snake sessions headlessly.

mod board;
mod config;

use std::{
    path::PathBuf,
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use torus_snake_core::{CollisionCause, Command, Event, Heading};
use torus_snake_system_scoreboard::{leaderboard, MemoryStore, RankOrder, Scoreboard};
use torus_snake_system_steering::{Script, Steering};
use torus_snake_world::{self as world, World};

use crate::config::RunConfig;

/// Command-line options for the headless Torus Snake runner.
#[derive(Debug, Parser)]
#[command(name = "torus-snake")]
#[command(version, about = "Plays snake sessions on a wrapping grid")]
struct Cli {
    /// TOML file with optional `[session]` and `[run]` tables
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for item placement; repeats the same arenas when reused
    #[arg(long)]
    seed: Option<u64>,

    /// Heading per tick, one of `UDLR.`; `.` keeps the current heading
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,

    /// Upper bound on ticks per session
    #[arg(long)]
    max_ticks: Option<u32>,

    /// Pause between ticks in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Number of sessions to play back to back
    #[arg(long)]
    sessions: Option<u32>,

    /// Print the arena after every session
    #[arg(long)]
    show_board: bool,

    /// Print recorded scores ranked in the given order
    #[arg(long, value_enum, value_name = "ORDER")]
    leaderboard: Option<LeaderboardOrder>,
}

impl Cli {
    /// Lets explicit flags win over values read from the configuration file.
    fn override_config(&self, config: &mut RunConfig) {
        if let Some(seed) = self.seed {
            config.session.seed = Some(seed);
        }
        if let Some(moves) = &self.moves {
            config.run.moves.clone_from(moves);
        }
        if let Some(max_ticks) = self.max_ticks {
            config.run.max_ticks = max_ticks;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.run.tick_ms = tick_ms;
        }
        if let Some(sessions) = self.sessions {
            config.run.sessions = sessions;
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LeaderboardOrder {
    /// Highest score first
    Score,
    /// Newest session first
    Recent,
}

impl From<LeaderboardOrder> for RankOrder {
    fn from(order: LeaderboardOrder) -> Self {
        match order {
            LeaderboardOrder::Score => RankOrder::Score,
            LeaderboardOrder::Recent => RankOrder::Recent,
        }
    }
}

/// Entry point for the Torus Snake command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    cli.override_config(&mut config);

    let script = Script::parse(&config.run.moves).context("invalid move script")?;
    let mut world =
        World::new(config.session.clone()).context("invalid session configuration")?;
    let pause = Duration::from_millis(config.run.tick_ms);

    let mut steering = Steering::new();
    let mut scoreboard = Scoreboard::new();
    let mut store = MemoryStore::new();

    for session in 1..=config.run.sessions {
        // The first session replays the configured seed so its arena matches a
        // fresh world built from the same configuration.
        let seed = if session == 1 {
            config.session.seed
        } else {
            None
        };
        let (ticks, events) = play_session(
            &mut world,
            &mut steering,
            &script,
            seed,
            config.run.max_ticks,
            pause,
        );

        let _ = scoreboard
            .handle(&events, now_ms()?, &mut store)
            .context("failed to record final score")?;

        println!(
            "session {session}: {} after {ticks} ticks, score {}, length {}",
            describe_outcome(&events),
            world.score(),
            world.snake_len(),
        );
        if cli.show_board {
            print!("{}", board::render(&world));
        }
    }

    if let Some(order) = cli.leaderboard {
        for entry in leaderboard(&store, order.into()) {
            println!(
                "{:>3}. {:>4} points  (recorded at {} ms)",
                entry.rank, entry.score, entry.timestamp_ms
            );
        }
    }

    Ok(())
}

/// Resets the world and steps it until game over or the tick limit.
///
/// Returns the number of ticks played and the events raised by the last one.
fn play_session(
    world: &mut World,
    steering: &mut Steering,
    script: &Script,
    seed: Option<u64>,
    max_ticks: u32,
    pause: Duration,
) -> (u32, Vec<Event>) {
    let mut events = Vec::new();
    let mut commands = Vec::new();
    world::apply(world, Command::Reset { seed }, &mut events);

    let mut ticks = 0;
    while ticks < max_ticks && !world.is_over() {
        let intents: Vec<Heading> = script.intent_at(ticks as usize).into_iter().collect();
        steering.handle(&events, &intents, &mut commands);

        events.clear();
        for command in commands.drain(..) {
            world::apply(world, command, &mut events);
        }
        world::apply(world, Command::Step, &mut events);
        ticks += 1;

        if !pause.is_zero() && !world.is_over() {
            thread::sleep(pause);
        }
    }

    tracing::info!(ticks, score = world.score(), over = world.is_over(), "session finished");
    (ticks, events)
}

fn describe_outcome(events: &[Event]) -> String {
    let collision = events.iter().find_map(|event| match event {
        Event::GameOver { cause, at, .. } => Some((*cause, *at)),
        _ => None,
    });
    match collision {
        Some((CollisionCause::Obstacle, at)) => format!("hit an obstacle at {at}"),
        Some((CollisionCause::SnakeBody, at)) => format!("ran into itself at {at}"),
        None => "still running".to_owned(),
    }
}

fn now_ms() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is set before the Unix epoch")?;
    u64::try_from(elapsed.as_millis()).context("timestamp does not fit in 64 bits")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
