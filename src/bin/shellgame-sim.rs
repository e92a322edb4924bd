//! Plays a lot of games with nobody watching, guessing at random, to check that the controller's idea of where the
//! ball is always matches the cups' actual order.

use std::process::ExitCode;

use clap::Parser;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use shellgame::{Animator, ConfigArgs, CupRow, Instruction, Phase, Replies, TimerQueue, WakeupKind};

#[derive(Parser)]
#[command(name = "shellgame-sim", about = "Play shell games headlessly and report the win rate")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
    /// How many games to play
    #[arg(long, default_value_t = 1000)]
    games: u32,
}

fn run(cli: Cli) -> shellgame::Result<()> {
    let config = cli.config.resolve()?;
    let mut controller = config.controller();
    // guesses come from their own stream so they don't perturb the game's
    let mut guesser = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(!seed),
        None => SmallRng::from_entropy(),
    };
    let mut timers = TimerQueue::new();
    let mut replies = Replies::default();
    let mut row = CupRow::new(config.cups);
    let mut swaps = 0u64;

    for game in 0..cli.games {
        controller.start_game(&mut timers, &mut replies);
        let ball = match controller.state().secret_slot {
            Some(slot) => row.cup_at(slot),
            None => return Err("game started without a ball".into()),
        };

        while controller.phase() != Phase::AwaitingGuess {
            let Some((_, wakeup)) = timers.pop_next() else {
                return Err(format!("game {} stalled in {:?}", game, controller.phase()).into());
            };
            controller.advance(wakeup, &mut timers, &mut replies);
            for inst in replies.drain() {
                if let Instruction::Swap { a, b, duration } = inst {
                    row.swap(a, b, duration);
                    swaps += 1;
                }
            }
        }
        row.finish();

        let secret = controller.state().secret_slot;
        if secret != row.slot_of(ball) {
            return Err(format!(
                "game {}: controller says {:?}, cups say {:?}",
                game,
                secret,
                row.slot_of(ball)
            )
            .into());
        }

        controller.handle_selection(guesser.gen_range(0..config.cups), &mut timers, &mut replies);
        match timers.pop_next() {
            Some((_, wakeup)) if wakeup.kind == WakeupKind::Reset => {
                controller.advance(wakeup, &mut timers, &mut replies)
            }
            other => return Err(format!("game {}: expected a reset, got {:?}", game, other).into()),
        }
        replies.drain();
    }

    let wins = controller.state().score;
    let rate = if cli.games == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(cli.games)
    };
    println!(
        "{} games, {} cups, {}: {} wins ({:.1}%, chance is {:.1}%), {} swaps",
        cli.games,
        config.cups,
        config.difficulty,
        wins,
        rate * 100.0,
        100.0 / config.cups as f64,
        swaps,
    );
    tracing::info!(games = cli.games, wins, swaps, "simulation done");
    Ok(())
}

fn main() -> ExitCode {
    // no UI to corrupt here, so logs can go straight to stderr
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shellgame-sim: {}", e);
            ExitCode::FAILURE
        }
    }
}
