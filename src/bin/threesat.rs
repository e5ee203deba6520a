use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use threesat::cnf::dimacs::to_dimacs;
use threesat::config::{CliOverrides, GameConfig, Variant};
use threesat::game::{Command, MonotonicClock, Notice, NoticeKind, Phase, Session, Snapshot};
use threesat::puzzle::instance::generate_instance;
use threesat::rng::session_rng;

#[derive(Debug, Parser)]
#[command(name = "threesat")]
#[command(about = "Flip the switches until every gate lights up")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    Play {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        variant: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        lives: Option<u32>,
    },
    Generate {
        #[arg(long, default_value_t = 0)]
        level: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        variant: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        emit: Option<PathBuf>,
    },
    Calibrate {
        #[arg(long, default_value_t = 12)]
        max_level: u32,
        #[arg(long, default_value_t = 20)]
        trials: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        variant: Option<String>,
        #[arg(long)]
        max_attempts: Option<u32>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Cmd::Play {
            seed,
            variant,
            config,
            lives,
        } => {
            let overrides = CliOverrides {
                starting_lives: lives,
                ..CliOverrides::default()
            };
            let config = load_config(variant.as_deref(), config.as_deref(), &overrides)?;
            play_cmd(config, seed)?
        }
        Cmd::Generate {
            level,
            seed,
            variant,
            config,
            emit,
        } => {
            let config = load_config(variant.as_deref(), config.as_deref(), &CliOverrides::default())?;
            generate_cmd(&config, level, seed, emit.as_deref())?
        }
        Cmd::Calibrate {
            max_level,
            trials,
            seed,
            variant,
            max_attempts,
        } => {
            let overrides = CliOverrides {
                max_attempts,
                ..CliOverrides::default()
            };
            let config = load_config(variant.as_deref(), None, &overrides)?;
            calibrate_cmd(&config, max_level, trials, seed)?
        }
    }
    Ok(())
}

fn init_tracing() {
    // stdout belongs to the board
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(
    variant: Option<&str>,
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<GameConfig> {
    let variant = variant.map(parse_variant).transpose()?;
    let mut config = GameConfig::resolve(variant, path)?;
    config.merge_with_cli(overrides);
    config.validate()?;
    Ok(config)
}

fn parse_variant(name: &str) -> Result<Variant> {
    match name {
        "classic" => Ok(Variant::Classic),
        "compact" => Ok(Variant::Compact),
        _ => bail!("unknown variant '{}', expected classic|compact", name),
    }
}

fn play_cmd(config: GameConfig, seed: Option<u64>) -> Result<()> {
    let (seed, rng) = session_rng(seed);
    let (tx, rx) = mpsc::channel();
    let mut session = Session::new(config, rng, MonotonicClock::new(), rx)?;
    let notices = session.subscribe();

    println!("seed={seed}  type a switch number to flip it, r to restart, q to quit");
    let printer = thread::spawn(move || render_loop(notices));
    // not joined: it may be parked on stdin when the session ends
    thread::spawn(move || read_commands(tx));

    session.run()?;
    drop(session);
    printer
        .join()
        .map_err(|_| anyhow!("renderer thread panicked"))?;
    Ok(())
}

fn read_commands(tx: Sender<Command>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        match parse_command(&line) {
            Some(cmd) => {
                if tx.send(cmd).is_err() {
                    break;
                }
            }
            None if line.trim().is_empty() => {}
            None => eprintln!("unrecognised input '{}'", line.trim()),
        }
    }
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "q" | "quit" => Some(Command::Cancel),
        "r" | "restart" => Some(Command::Restart),
        other => other.parse::<usize>().ok().map(Command::Toggle),
    }
}

fn render_loop(notices: Receiver<Notice>) {
    let mut last_secs = None;
    for notice in notices {
        let secs = notice.snapshot.time_remaining.map(|t| t.as_secs_f64().round() as u64);
        if notice.kind == NoticeKind::Tick && secs == last_secs {
            continue;
        }
        last_secs = secs;
        match notice.kind {
            NoticeKind::Won => println!("*** solved ***"),
            NoticeKind::Timeout => println!("*** out of time ***"),
            NoticeKind::Cancelled => {
                println!("final score {}", notice.snapshot.score);
                continue;
            }
            _ => {}
        }
        print!("{}", render(&notice.snapshot));
    }
}

fn render(snap: &Snapshot) -> String {
    let mut out = String::new();
    let time = snap
        .time_remaining
        .map(|t| format!("{:.0}", t.as_secs_f64()))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "\nlives {:<3} time {:>3}  score {}  level {}\n",
        "I".repeat(snap.lives as usize),
        time,
        snap.score,
        snap.level
    ));
    for (clause, sat) in snap.formula.clauses.iter().zip(&snap.clause_status) {
        let mark = if *sat { '+' } else { '.' };
        out.push_str(&format!("  [{mark}] {clause}\n"));
    }
    let switches = snap
        .assignment
        .bits()
        .iter()
        .enumerate()
        .map(|(i, &b)| format!("{}:{}", i, u8::from(b)))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("  switches  {switches}\n"));
    if snap.phase == Phase::GameOver {
        out.push_str("\n  ===== GAME OVER =====  (r to play again)\n");
    }
    out
}

fn generate_cmd(config: &GameConfig, level: u32, seed: Option<u64>, emit: Option<&Path>) -> Result<()> {
    let (seed, mut rng) = session_rng(seed);
    let inst = generate_instance(level, config, &mut rng)?;
    println!(
        "seed={} level={} n={} clauses={} timeout={}s easiness={} attempts={}",
        seed,
        inst.level,
        inst.n,
        inst.formula.len(),
        inst.timeout.as_secs(),
        inst.easiness,
        inst.attempts
    );
    println!("{}", inst.formula);
    if let Some(path) = emit {
        std::fs::write(path, to_dimacs(&inst.formula))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn calibrate_cmd(config: &GameConfig, max_level: u32, trials: u32, seed: Option<u64>) -> Result<()> {
    if trials == 0 {
        bail!("trials must be >= 1");
    }
    let (seed, mut rng) = session_rng(seed);
    println!("seed={seed}");
    for level in 0..=max_level {
        let n = config.vars_for_level(level);
        let mut easiness_sum = 0.0;
        let mut attempts_sum = 0u64;
        for _ in 0..trials {
            let inst = generate_instance(level, config, &mut rng)?;
            easiness_sum += inst.easiness.as_f64();
            attempts_sum += u64::from(inst.attempts);
        }
        println!(
            "level={} n={} timeout={}s ceiling=1/{} mean_easiness={:.4} mean_attempts={:.1}",
            level,
            n,
            config.timeout_for_level(level).as_secs(),
            config.ceiling_denominator(level, n),
            easiness_sum / f64::from(trials),
            attempts_sum as f64 / f64::from(trials)
        );
    }
    Ok(())
}
