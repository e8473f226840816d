use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::DEFAULT_WIN_TARGET;
use twenty48_cli::{play_games, Command, Console, Flow, JsonStore, HELP};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// The tile that wins the game, a power of two
    #[arg(short, long, default_value_t = DEFAULT_WIN_TARGET)]
    win_target: u32,

    /// Save the game as JSON files into this directory, and resume from it
    #[arg(short, long)]
    save_dir: Option<PathBuf>,

    /// Play this many games with random moves instead of reading commands
    #[arg(short, long)]
    autoplay: Option<usize>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    if args.win_target < 4 || !args.win_target.is_power_of_two() {
        anyhow::bail!(
            "The win target must be a power of two and at least 4, got {}",
            args.win_target
        );
    }

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    if let Some(num_games) = args.autoplay {
        let summary = play_games(&mut rng, num_games, args.win_target);
        println!("{}", summary);
        return Ok(());
    }

    let store = args.save_dir.map(JsonStore::new).transpose()?;
    let mut console = Console::start(rng, args.win_target, store)?;
    println!("{}", console.render());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };
        match console.apply(command)? {
            Flow::Render => println!("{}", console.render()),
            Flow::Help => println!("{}", HELP),
            Flow::Quit => break,
        }
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
