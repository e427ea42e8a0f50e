//! Replay a JSON script of table commands and log every notification.

use std::path::PathBuf;

use anyhow::Error;
use log::{info, warn};
use pico_args::Arguments;
use pokerlib::game::policy::ShowdownRule;
use pp_replay::{Script, replay};

const HELP: &str = "\
Replay a scripted session against a poker table

USAGE:
  pp_replay --script FILE [OPTIONS]

OPTIONS:
  --script     FILE        JSON script with config, players and commands
  --seed       N           Shuffle seed, overrides the script's config
  --showdown   RULE        reveal_all, choice_to_show or no_muck, overrides the script's config

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log level [default: info], debug shows private events
";

struct Args {
    script: PathBuf,
    seed: Option<u64>,
    showdown: Option<ShowdownRule>,
}

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        script: pargs.value_from_str("--script")?,
        seed: pargs.opt_value_from_str("--seed")?,
        showdown: pargs.opt_value_from_str("--showdown")?,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let mut script = Script::from_path(&args.script)?;
    if let Some(seed) = args.seed {
        script.config.seed = Some(seed);
    }
    if let Some(showdown) = args.showdown {
        script.config.showdown = showdown;
    }
    info!(
        "replaying {} commands from {}",
        script.commands.len(),
        args.script.display()
    );

    let replay = replay(script)?;
    for player in replay.table.players() {
        info!("{player}");
    }
    if !replay.rejections.is_empty() {
        warn!("{} commands were rejected", replay.rejections.len());
    }
    Ok(())
}
