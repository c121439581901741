use crate::config::DEFAULT_NAME;
use chrono::Duration;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PomodoroCLI {
    /// Override the timer directory, can also be overridden using $POMODORO_ROOT
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Name of the timer
    #[arg(short, long, default_value = DEFAULT_NAME)]
    pub name: String,
    /// Length of a work interval (XhYmZs, or plain minutes)
    #[arg(short, long, default_value = "25m", value_parser = parse_duration::parse_arg)]
    pub work: Duration,
    /// Length of a break interval (XhYmZs, or plain minutes)
    #[arg(short = 'b', long = "break", default_value = "5m", value_parser = parse_duration::parse_arg)]
    pub rest: Duration,
    /// Defaults to `status`
    #[command(subcommand)]
    pub command: Option<CLISubcommand>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CLISubcommand {
    /// Start a work interval
    Start,
    /// Stop and forget the timer
    Stop,
    /// Pause the running timer
    Pause,
    /// Resume a paused timer
    Resume,
    /// Print the phase and remaining time, e.g. W1500, PB0400 or --:--
    Status,
}

mod parse_duration {
    use chrono::Duration;
    use nom::{
        bytes::complete::{tag, take_while},
        combinator::map_res,
        IResult,
    };

    pub fn parse_arg(time: &str) -> Result<Duration, String> {
        let seconds = match time.parse::<usize>() {
            Ok(minutes) => minutes.checked_mul(60),
            Err(_) if time.is_empty() => return Err("Duration must not be empty".to_owned()),
            Err(_) => match parse_duration(time) {
                Ok(("", duration)) => Some(duration),
                Ok((remaining, _)) => {
                    return Err(format!(
                        "Could not parse this remaining duration fragment: {remaining}"
                    ))
                }
                Err(error) => return Err(error.to_string()),
            },
        };

        seconds
            .and_then(|seconds| i64::try_from(seconds).ok())
            .and_then(Duration::try_seconds)
            .ok_or_else(|| format!("Duration is too long: {time}"))
    }

    pub fn parse_duration(duration: &str) -> IResult<&str, usize> {
        let (duration, hours) = parse_time(duration, "h", 60 * 60).unwrap_or((duration, 0));
        let (duration, minutes) = parse_time(duration, "m", 60).unwrap_or((duration, 0));
        let (duration, seconds) = parse_time(duration, "s", 1).unwrap_or((duration, 0));

        Ok((duration, hours.saturating_add(minutes).saturating_add(seconds)))
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn parse_time<'a>(
        i: &'a str,
        end_tag: &'static str,
        multiplier: usize,
    ) -> IResult<&'a str, usize> {
        let mut duration = map_res(take_while(is_digit), str::parse::<usize>)(i)?;
        (duration.0, _) = tag(end_tag)(duration.0)?;

        Ok((duration.0, duration.1.saturating_mul(multiplier)))
    }

    #[cfg(test)]
    mod test {
        use super::parse_arg;
        use chrono::Duration;

        #[test]
        fn test_correct_times() {
            assert_eq!(parse_arg("1m"), Ok(Duration::seconds(60)));
            assert_eq!(parse_arg("6h7s"), Ok(Duration::seconds(21607)));
            assert_eq!(parse_arg("1h30m"), Ok(Duration::seconds(5400)));
            assert_eq!(parse_arg("0m"), Ok(Duration::zero()));
        }

        #[test]
        fn test_plain_minutes() {
            assert_eq!(parse_arg("25"), Ok(Duration::minutes(25)));
            assert_eq!(parse_arg("0"), Ok(Duration::zero()));
        }

        #[test]
        fn test_incorrect_times() {
            assert!(parse_arg("1s2h").is_err());
            assert!(parse_arg("6d3s").is_err());
            assert!(parse_arg("").is_err());
            assert!(parse_arg("-5").is_err());
            assert!(parse_arg("99999999999999999999h").is_err());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = PomodoroCLI::try_parse_from(["pomodoro"]).unwrap();

        assert_eq!(args.name, "default");
        assert_eq!(args.work, Duration::minutes(25));
        assert_eq!(args.rest, Duration::minutes(5));
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_subcommand_with_options() {
        let args = PomodoroCLI::try_parse_from([
            "pomodoro", "--name", "focus", "-w", "50m", "--break", "10", "pause",
        ])
        .unwrap();

        assert_eq!(args.name, "focus");
        assert_eq!(args.work, Duration::minutes(50));
        assert_eq!(args.rest, Duration::minutes(10));
        assert_eq!(args.command, Some(CLISubcommand::Pause));
    }
}
