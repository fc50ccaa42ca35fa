use anyhow::Result;
use clap::Parser;
use engine::HeadlessRunner;
use flappy::phase::GamePhase;
use flappy::session::{FlappyLogic, GameSession, TickInput};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICK_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Parser)]
#[command(name = "headless")]
#[command(about = "Run flappy without a window using a simple autopilot and print a JSON summary")]
struct Cli {
    /// Upper bound on simulated ticks.
    #[arg(long, default_value_t = 3_600)]
    ticks: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    ticks: usize,
    phase: GamePhase,
    score: u32,
    high_score: u32,
    obstacles_live: usize,
    spawn_interval_ms: u64,
}

/// Flaps whenever the bird is falling and its centre has sunk below the middle of the next gap.
fn autopilot(frame: usize, session: &GameSession) -> TickInput {
    let now_ms = (frame as f64 * TICK_MS) as u64;
    if session.phase() != GamePhase::Playing {
        return TickInput::action(now_ms);
    }

    let avatar = session.avatar();
    let (_, cy) = avatar.bounds().center();
    let target = session
        .stream()
        .obstacles()
        .iter()
        .find(|o| o.right() >= avatar.left())
        .map(|o| (o.gap_top() + o.gap_bottom()) / 2.0)
        .unwrap_or(session.playfield().height / 2.0);

    if avatar.velocity_y() >= 0.0 && cy > target + 20.0 {
        TickInput::action(now_ms)
    } else {
        TickInput::idle(now_ms)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(seed = cli.seed, ticks = cli.ticks, "headless run");

    let mut runner = HeadlessRunner::new(FlappyLogic::new(cli.seed));
    // Stop on the first crash rather than letting the autopilot restart.
    let ticks = runner.run_until(cli.ticks, autopilot, |session| {
        session.phase() == GamePhase::GameOver
    });

    let session = runner.state();
    let summary = Summary {
        seed: cli.seed,
        ticks,
        phase: session.phase(),
        score: session.score(),
        high_score: session.high_score(),
        obstacles_live: session.stream().obstacles().len(),
        spawn_interval_ms: session.stream().spawn_interval_ms(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
