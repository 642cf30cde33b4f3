use std::{
    fmt,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use num_traits::AsPrimitive;
use stringart::{Config, Engine, Filter, Float, Generation, ScoreMode};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file path.
    #[arg()]
    input: PathBuf,

    /// Number of pins around the circle.
    #[arg(short = 'n', long, default_value_t = 200, allow_negative_numbers = true)]
    points: i32,

    /// Number of threads to lay down.
    #[arg(short, long, default_value_t = 2000, allow_negative_numbers = true)]
    lines: i32,

    /// Darkness removed from every pixel a thread covers.
    #[arg(short, long, default_value_t = 20, allow_negative_numbers = true)]
    weight: i32,

    /// Size in pixels of the longest side of the working image.
    #[arg(short, long, default_value_t = 512)]
    resolution: u32,

    /// Filter used when downsampling the image.
    #[arg(long, value_enum, default_value_t = FilterArg::Lanczos3)]
    filter: FilterArg,

    /// How the darkness under a candidate thread is scored.
    #[arg(long, value_enum, default_value_t = ScoreArg::Average)]
    score: ScoreArg,

    /// Minimum pin count between linked pins.
    #[arg(long, default_value_t = 0)]
    min_pin_distance: usize,

    /// Precision of calculations (Single/Double).
    #[arg(short, long, default_value_t = Precision::Single)]
    precision: Precision,

    /// Worker threads, 0 for one per logical CPU.
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Stroke colour of the SVG lines.
    #[arg(long, default_value = "black")]
    color: String,

    /// Stroke width of the SVG lines, in output pixels.
    #[arg(long, default_value_t = 0.5)]
    thickness: f32,

    /// Write the SVG preview here.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the lines as `[[x1, y1], [x2, y2]]` JSON here.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the winding instructions here.
    #[arg(long)]
    instructions: Option<PathBuf>,

    /// Stop after this many seconds, keeping the lines found so far.
    #[arg(long)]
    time_limit: Option<f64>,

    /// More output per occurrence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<FilterArg> for Filter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::Nearest => Filter::Nearest,
            FilterArg::Triangle => Filter::Triangle,
            FilterArg::CatmullRom => Filter::CatmullRom,
            FilterArg::Gaussian => Filter::Gaussian,
            FilterArg::Lanczos3 => Filter::Lanczos3,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScoreArg {
    Average,
    Total,
}

impl From<ScoreArg> for ScoreMode {
    fn from(score: ScoreArg) -> Self {
        match score {
            ScoreArg::Average => ScoreMode::Average,
            ScoreArg::Total => ScoreMode::Total,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Precision {
    Single,
    Double,
}

impl ValueEnum for Precision {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Single, Self::Double]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Single => clap::builder::PossibleValue::new("Single")
                .alias("single")
                .alias("f32"),
            Self::Double => clap::builder::PossibleValue::new("Double")
                .alias("double")
                .alias("f64"),
        })
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "Single",
            Self::Double => "Double",
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match args.precision {
        Precision::Single => with_precision::<f32>(&args),
        Precision::Double => with_precision::<f64>(&args),
    }
}

fn with_precision<S: Float>(args: &Args) -> anyhow::Result<()>
where
    usize: AsPrimitive<S>,
    u8: AsPrimitive<S>,
{
    let image = fs::read(&args.input)
        .with_context(|| format!("Failed reading {}", args.input.display()))?;
    let config = Config::new(args.points, args.lines, args.weight)
        .with_max_resolution(args.resolution)
        .with_filter(args.filter.into())
        .with_score(args.score.into())
        .with_min_pin_distance(args.min_pin_distance);

    let mut engine = Engine::new(args.threads);
    engine.initialize()?;
    let art = match args.time_limit {
        None => engine.generate::<S>(&image, &config)?,
        Some(secs) => {
            let limit = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Invalid time limit {secs}"))?;
            let task = engine.spawn::<S>(image, config)?;
            match task.wait_timeout(limit) {
                Some(result) => result?,
                None => {
                    tracing::warn!(secs, "time limit reached, keeping the lines found so far");
                    task.cancel();
                    task.wait()?
                }
            }
        }
    };
    tracing::info!(lines = art.len(), completion = ?art.completion(), "generation finished");

    if args.svg.is_none() && args.json.is_none() && args.instructions.is_none() {
        let file_name = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .context("Invalid file name")?;
        let out_folder = args
            .input
            .parent()
            .unwrap_or(Path::new("."))
            .join("output");
        fs::create_dir_all(&out_folder).context("Output directory can not be created")?;
        save_svg(&out_folder.join(format!("{file_name}.svg")), &art, args)?;
        save_instructions(&out_folder.join(format!("{file_name}.txt")), &art)?;
        return Ok(());
    }
    if let Some(path) = &args.svg {
        save_svg(path, &art, args)?;
    }
    if let Some(path) = &args.json {
        let json = serde_json::to_string(&art.coordinates())?;
        fs::write(path, json).with_context(|| format!("Failed writing {}", path.display()))?;
    }
    if let Some(path) = &args.instructions {
        save_instructions(path, &art)?;
    }
    Ok(())
}

fn save_svg<S: Float>(path: &Path, art: &Generation<S>, args: &Args) -> anyhow::Result<()> {
    let doc = art.build_svg(&args.color, args.thickness);
    let mut file = BufWriter::new(
        File::create(path).with_context(|| format!("Failed creating {}", path.display()))?,
    );
    writeln!(file, r#"<?xml version="1.0" standalone="no"?>"#)?;
    svg::write(&mut file, &doc)?;
    file.flush()?;
    tracing::info!(path = %path.display(), "svg saved");
    Ok(())
}

fn save_instructions<S: Float>(path: &Path, art: &Generation<S>) -> anyhow::Result<()> {
    fs::write(path, art.build_instructions())
        .with_context(|| format!("Failed writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "instructions saved");
    Ok(())
}
