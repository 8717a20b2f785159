use clap::{Parser, Subcommand};
use nag::config::{self, Config};
use nag::schedule::VirtualClock;
use nag::{Event, Session, UiState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "nag", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Run a session on a virtual clock and print every transition
    Simulate {
        /// Simulated run time in seconds
        #[arg(short = 'd', long, default_value_t = 30)]
        seconds: u64,

        /// Seed for popup and button placement (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Viewport width (overrides the config file)
        #[arg(long)]
        width: Option<u32>,

        /// Viewport height (overrides the config file)
        #[arg(long)]
        height: Option<u32>,

        /// Hover the evasive button every N milliseconds
        #[arg(long, value_name = "MS")]
        hover_every: Option<u64>,

        /// Read this config file instead of the default location
        #[arg(short, long = "config", value_name = "FILE")]
        config_file: Option<PathBuf>,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigAction {
    /// Print where the config file lives
    Path,
    /// Write the default config file if none exists
    Init,
    /// Print the built-in default config
    Default,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            seconds,
            seed,
            width,
            height,
            hover_every,
            config_file,
        } => {
            let mut config = match config_file {
                Some(path) => config::load_config_from(path)?,
                None => config::load_or_default(),
            };
            if let Some(width) = width {
                config.window.width = width;
            }
            if let Some(height) = height {
                config.window.height = height;
            }
            simulate(
                config,
                Duration::from_secs(seconds),
                seed.unwrap_or_else(rand::random),
                hover_every.filter(|&ms| ms > 0).map(Duration::from_millis),
            );
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                println!("{}", config::get_config_path()?.display());
                Ok(())
            }
            ConfigAction::Init => {
                let path = config::write_default_config()?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigAction::Default => {
                print!("{}", config::DEFAULT_CONFIG);
                Ok(())
            }
        },
    }
}

fn simulate(config: Config, length: Duration, seed: u64, hover_every: Option<Duration>) {
    let viewport = config.window.viewport();
    println!(
        "seed {}, viewport {}x{}, {}s",
        seed,
        viewport.width,
        viewport.height,
        length.as_secs()
    );

    let clock = VirtualClock::new();
    let mut session = Session::new(config, clock.clone(), ChaCha8Rng::seed_from_u64(seed));
    session.mount();

    let mut next_hover = hover_every;
    loop {
        let until = next_hover.map_or(length, |at| at.min(length));
        clock.run_until(until, |at, event| step(&mut session, at, event));
        if until >= length {
            break;
        }
        step(&mut session, until, Event::ButtonHovered);
        next_hover = next_hover.zip(hover_every).map(|(at, every)| at + every);
    }

    let state = session.state().clone();
    session.unmount();

    println!("---");
    println!("popups on screen: {}", state.popups.len());
    println!("button at ({:.0}, {:.0})", state.button.x, state.button.y);
    println!(
        "sound: {}",
        state.sound.map(|s| s.label()).unwrap_or("(silence)")
    );
}

fn step<S, R>(session: &mut Session<S, R>, at: Duration, event: Event)
where
    S: nag::schedule::Scheduler,
    R: rand::Rng,
{
    let before = session.state().clone();
    let label = format!("{:?}", event);
    if session.dispatch(event) {
        for change in describe(&before, session.state()) {
            println!("{:>7}ms  {:<24} {}", at.as_millis(), label, change);
        }
    }
}

fn describe(before: &UiState, after: &UiState) -> Vec<String> {
    let mut changes = Vec::new();

    if before.loading != after.loading {
        changes.push(format!("loading {}", after.loading));
    }
    for popup in after
        .popups
        .iter()
        .filter(|p| before.popup(p.id).is_none())
    {
        changes.push(format!(
            "popup #{} at ({:.0}, {:.0})",
            popup.id, popup.position.x, popup.position.y
        ));
    }
    for popup in before
        .popups
        .iter()
        .filter(|p| after.popup(p.id).is_none())
    {
        changes.push(format!("popup #{} closed", popup.id));
    }
    if before.shaking != after.shaking {
        changes.push(if after.shaking { "shaking" } else { "still" }.to_string());
    }
    if before.button != after.button {
        changes.push(format!(
            "button to ({:.0}, {:.0})",
            after.button.x, after.button.y
        ));
    }
    if before.cursor != after.cursor {
        changes.push(format!(
            "cursor to ({:.0}, {:.0})",
            after.cursor.x, after.cursor.y
        ));
    }
    if before.menu_open != after.menu_open {
        changes.push(format!("menu open {}, zoom {}%", after.menu_open, after.zoom));
    }
    if before.dark_mode != after.dark_mode {
        changes.push(format!(
            "dark mode {}, rotation {}",
            after.dark_mode, after.rotation
        ));
    }
    if before.muted != after.muted {
        changes.push(format!("muted {}", after.muted));
    }
    if before.sound != after.sound {
        changes.push(match after.sound {
            Some(kind) => format!("sound: {}", kind),
            None => "sound cleared".to_string(),
        });
    }

    changes
}
