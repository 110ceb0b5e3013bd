use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use sketchconfig::MAX_INTERVAL;

#[derive(Parser, Debug)]
#[command(
    name = "sketchbook",
    author,
    version,
    about = "Generative-art sketch gallery",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Artwork to open first (see `sketchbook list`).
    #[arg(long, value_name = "ID")]
    pub artwork: Option<String>,

    /// Configuration file; defaults to `sketchbook.toml` in the config directory.
    #[arg(long, value_name = "FILE", env = "SKETCHBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Initial window size (e.g. `1280x800`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Optional FPS cap for the gallery window (0=uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Advance to the next artwork after this long (e.g. `30s`, `2m`).
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub slideshow: Option<Duration>,

    /// Visit slideshow artworks in a random order.
    #[arg(long)]
    pub shuffle: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the registered artworks in menu order.
    List(ListArgs),
    /// Render one artwork off-screen and save it as PNG.
    Render(RenderArgs),
    /// Print the resolved configuration directory and file.
    Where,
}

#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Include placeholder entries that have no drawing yet.
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Artwork id (see `sketchbook list`).
    #[arg(value_name = "ID")]
    pub artwork: String,

    /// Destination PNG file.
    #[arg(long, short, value_name = "FILE")]
    pub out: PathBuf,

    /// Number of frames to draw before saving.
    #[arg(long, value_name = "N", default_value_t = 60,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Pointer position in canvas pixels (e.g. `120,80`).
    #[arg(long, value_name = "X,Y", value_parser = parse_pointer, default_value = "0,0")]
    pub pointer: (f32, f32),

    /// Container width used to size fit-to-container sketches.
    #[arg(long, value_name = "WIDTH", default_value_t = artworks::DEFAULT_CONTAINER_WIDTH,
          value_parser = clap::value_parser!(u32).range(21..))]
    pub width: u32,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| "expected WxH format, e.g. 1280x800".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width.trim()))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height.trim()))?;

    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".to_string());
    }
    Ok((width, height))
}

pub fn parse_pointer(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .trim()
        .split_once(',')
        .ok_or_else(|| "expected X,Y format, e.g. 120,80".to_string())?;
    let parse = |part: &str| -> Result<f32, String> {
        let number: f32 = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid coordinate '{}'", part.trim()))?;
        if number.is_finite() {
            Ok(number)
        } else {
            Err(format!("coordinate '{}' must be finite", part.trim()))
        }
    };
    Ok((parse(x)?, parse(y)?))
}

pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let trimmed = value.trim();
    let duration = match trimmed.parse::<u64>() {
        Ok(seconds) => Duration::from_secs(seconds),
        Err(_) => humantime::parse_duration(trimmed)
            .map_err(|err| format!("invalid duration '{trimmed}': {err}"))?,
    };
    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    if duration > MAX_INTERVAL {
        return Err(format!(
            "duration must be at most {}",
            humantime::format_duration(MAX_INTERVAL)
        ));
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_accept_common_separators() {
        assert_eq!(parse_size("1280x800"), Ok((1280, 800)));
        assert_eq!(parse_size(" 640 X 480 "), Ok((640, 480)));
        assert_eq!(parse_size("800×600"), Ok((800, 600)));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x800").is_err());
    }

    #[test]
    fn pointers_are_two_finite_numbers() {
        assert_eq!(parse_pointer("120,80"), Ok((120.0, 80.0)));
        assert_eq!(parse_pointer("-5, 2.5"), Ok((-5.0, 2.5)));
        assert!(parse_pointer("12").is_err());
        assert!(parse_pointer("inf,1").is_err());
    }

    #[test]
    fn durations_take_seconds_or_humantime() {
        assert_eq!(parse_duration("30"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("1m 30s"), Ok(Duration::from_secs(90)));
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("soon").is_err());
        assert_eq!(parse_duration("365days"), Ok(MAX_INTERVAL));
        assert!(parse_duration("366days").is_err());
        assert!(parse_duration("18446744073709551615").is_err());
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["sketchbook", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::List(ListArgs { json: true, all: false }))));

        let cli = Cli::try_parse_from([
            "sketchbook", "render", "wave", "--out", "wave.png", "--pointer", "10,20",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Render(args)) => {
                assert_eq!(args.artwork, "wave");
                assert_eq!(args.frames, 60);
                assert_eq!(args.pointer, (10.0, 20.0));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["sketchbook", "--artwork", "spiral", "--shuffle"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.artwork.as_deref(), Some("spiral"));
        assert!(cli.run.shuffle);
    }
}
