use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use skirmish::{MarkerGrid, MovementSession, OffsetCoord, SessionConfig};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
    str::FromStr,
};
use structopt::StructOpt;

/// Replay a movement-session event script against an ASCII board. The board
/// comes from a map file, events come from a script file or stdin, and the
/// `show` event prints the board with the session's current visuals.
#[derive(Debug, StructOpt)]
#[structopt(name = "skirmish")]
struct Opt {
    /// Path to the board file: one line per row, one character per cell,
    /// with `.` for blank, `U` for the unit, and `#` for an obstacle
    #[structopt(short, long)]
    map: PathBuf,

    /// Path to a session config file. Supported formats: JSON, TOML. The
    /// default config is used if this is omitted
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to the event script; stdin is read instead when this is
    /// omitted. One event per line:
    ///
    /// hover COL,ROW - move the pointer to a cell
    ///
    /// click COL,ROW - activate the primary trigger on a cell
    ///
    /// cancel - drop the current selection
    ///
    /// show - print the board
    ///
    /// Blank lines and lines starting with `#` are skipped.
    #[structopt(short, long)]
    script: Option<PathBuf>,

    /// The logging level to use while replaying. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// One parsed line of the event script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    /// The pointer came to rest on a cell
    Hover(OffsetCoord),
    /// The primary trigger fired on a cell
    Click(OffsetCoord),
    /// Drop the current selection
    Cancel,
    /// Print the board, including the session's current visuals
    Show,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let keyword = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let command = match keyword {
            "hover" => Self::Hover(parse_coord(keyword, words.next())?),
            "click" => Self::Click(parse_coord(keyword, words.next())?),
            "cancel" => Self::Cancel,
            "show" => Self::Show,
            other => bail!("unknown command {:?}", other),
        };
        if let Some(trailing) = words.next() {
            bail!("unexpected argument {:?}", trailing);
        }
        Ok(command)
    }
}

/// Parse the `COL,ROW` argument of a hover/click command. Coordinates can be
/// negative; the session treats off-board cells as empty space under the
/// pointer.
fn parse_coord(
    keyword: &str,
    arg: Option<&str>,
) -> anyhow::Result<OffsetCoord> {
    let arg = arg
        .ok_or_else(|| anyhow!("{} needs a COL,ROW argument", keyword))?;
    let (col, row) = arg
        .split_once(',')
        .ok_or_else(|| anyhow!("expected COL,ROW, got {:?}", arg))?;
    let col = col
        .trim()
        .parse()
        .with_context(|| format!("invalid column in {:?}", arg))?;
    let row = row
        .trim()
        .parse()
        .with_context(|| format!("invalid row in {:?}", arg))?;
    Ok(OffsetCoord::new(col, row))
}

fn load_config(config_path: &Path) -> anyhow::Result<SessionConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let map_text = fs::read_to_string(&opt.map)
        .with_context(|| format!("error reading map file {:?}", &opt.map))?;
    let mut grid = MarkerGrid::from_ascii(&map_text)
        .with_context(|| format!("error parsing map file {:?}", &opt.map))?;
    info!(
        "Loaded a {}x{} board from {:?}",
        grid.cols(),
        grid.rows(),
        &opt.map
    );

    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => SessionConfig::default(),
    };
    let mut session = MovementSession::new(config)?;

    let script = match &opt.script {
        Some(script_path) => {
            fs::read_to_string(script_path).with_context(|| {
                format!("error reading script file {:?}", script_path)
            })?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("error reading script from stdin")?;
            buffer
        }
    };

    for (line_number, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command: Command = line.parse().with_context(|| {
            format!("error on script line {}", line_number + 1)
        })?;
        match command {
            Command::Hover(coord) => session.pointer_moved(&mut grid, coord),
            Command::Click(coord) => {
                session.trigger_activated(&mut grid, coord)
            }
            Command::Cancel => session.cancel(&mut grid),
            Command::Show => print!("{}", grid),
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
