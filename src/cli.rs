use crate::config::{Config, load_config};
use crate::layout::plan_label_footprints_with;
use crate::layout_dump::{PlacementDump, write_placement_dump};
use crate::parser::parse_scene;
use crate::profile::{ProfileKind, to_normalized_sizes};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "tokenplot",
    version,
    about = "Plan label anchors for tokens on a two-axis chart"
)]
pub struct Args {
    /// Scene file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the placement dump. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (planner weights, base pixel constants)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(short = 'w', long = "width", default_value_t = 280.0)]
    pub width: f32,

    /// Chart height in pixels (charts are square; width wins on mismatch)
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Base pixel constants to use
    #[arg(short = 'p', long = "profile", value_enum, default_value = "auto")]
    pub profile: ProfileChoice,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ProfileChoice {
    Auto,
    Compact,
    Desktop,
}

impl ProfileChoice {
    fn resolve(self, config: &Config, width: f32) -> ProfileKind {
        match self {
            ProfileChoice::Auto => config.profiles.kind_for_width(width),
            ProfileChoice::Compact => ProfileKind::Compact,
            ProfileChoice::Desktop => ProfileKind::Desktop,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let height = args.height.unwrap_or(args.width);
    let dump = plan_scene(&input, &config, args.width, height, args.profile)?;
    write_output(&dump, args.output.as_deref())
}

/// Parse a scene and plan its labels for a chart of the given pixel size.
pub fn plan_scene(
    input: &str,
    config: &Config,
    width: f32,
    height: f32,
    choice: ProfileChoice,
) -> Result<PlacementDump> {
    let scene = parse_scene(input)?;
    let kind = choice.resolve(config, width);
    let base = config.profiles.constants(kind);
    let size_profile = to_normalized_sizes(&base, width, height);
    let candidates = scene.candidates(&base);
    let placements = plan_label_footprints_with(&candidates, &size_profile, &config.planner);
    Ok(PlacementDump::from_placements(
        &placements,
        width,
        height,
        kind,
        size_profile,
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(dump: &PlacementDump, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_placement_dump(io::BufWriter::new(file), dump)
        }
        None => write_placement_dump(io::stdout().lock(), dump),
    }
}
