use clap::Parser;
use colored::Colorize;
use pomodoro::{
    args::{CLISubcommand, PomodoroCLI},
    config::{self, TimerConfig},
    error::PomodoroError,
    slot::FileSlot,
    time::seconds_to_string,
    timer::Pomodoro,
};
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), PomodoroError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = PomodoroCLI::parse();
    let root = config::resolve_root(args.root)?;
    let config = TimerConfig::new(root, args.name, args.work, args.rest)?;
    debug!("Using timer file {}", config.slot_path().display());

    let pomodoro = Pomodoro::from_config(&config);
    let command = args.command.unwrap_or(CLISubcommand::Status);

    match run(&pomodoro, command) {
        Err(PomodoroError::Notice(notice)) => println!("{}", notice.to_string().yellow()),
        result => result?,
    }

    Ok(())
}

fn run(pomodoro: &Pomodoro<FileSlot>, command: CLISubcommand) -> Result<(), PomodoroError> {
    let name = pomodoro.name().bright_blue();

    match command {
        CLISubcommand::Start => {
            pomodoro.start()?;
            let work = usize::try_from(pomodoro.work().num_seconds()).unwrap_or_default();

            println!(
                "Started {} work interval for timer '{}'",
                seconds_to_string(work).bright_yellow(),
                name
            );
        }
        CLISubcommand::Stop => {
            if pomodoro.stop()? {
                println!("Stopped timer '{}'", name);
            }
        }
        CLISubcommand::Pause => {
            pomodoro.pause()?;
            println!("Paused timer '{}'", name);
        }
        CLISubcommand::Resume => {
            if pomodoro.resume()? {
                println!("Resumed timer '{}'", name);
            }
        }
        CLISubcommand::Status => println!("{}", pomodoro.status()?),
    }

    Ok(())
}
