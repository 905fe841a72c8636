use clap::{Parser, Subcommand};
use knob::config::{self, Config};
use knob::{KnobControl, LevelMeter, MeterStyle, Point, PointerKind, angle};
use palette::Srgb;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "knob", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Load this config file instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Half-width of the dead zone, in degrees
    #[arg(short = 'l', long, global = true)]
    limit: Option<f64>,

    /// Number of bars in the level meter
    #[arg(short = 's', long, global = true)]
    segments: Option<usize>,

    /// Meter coloring: "rainbow" or "binary"
    #[arg(long, global = true)]
    style: Option<MeterStyle>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Map a single touch to its angle, rotation and value
    Angle {
        /// Knob center as `x,y`
        #[arg(long, allow_hyphen_values = true)]
        center: Point,
        /// Touch position as `x,y`
        #[arg(long, allow_hyphen_values = true)]
        touch: Point,
    },
    /// Render the level meter for a value
    Meter {
        #[arg(long, allow_hyphen_values = true)]
        value: f64,
    },
    /// Feed `down|move|up X Y` lines from stdin through a knob
    Trace {
        /// Knob size as `width,height`; the center is its middle
        #[arg(long, default_value = "100,100")]
        size: Point,
    },
    /// Write the default config file
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::InitConfig = cli.command {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    match cli.command {
        Commands::Angle { center, touch } => print_angle(&config, center, touch),
        Commands::Meter { value } => print_meter(&config, value),
        Commands::Trace { size } => trace(&config, size),
        Commands::InitConfig => Ok(()),
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_or_default(),
    };

    if let Some(limit) = cli.limit {
        config.limiting_angle = limit;
    }
    if let Some(segments) = cli.segments {
        config.segment_count = segments;
    }
    if let Some(style) = cli.style {
        config.meter_style = style;
    }

    config.validate()?;
    Ok(config)
}

fn print_angle(config: &Config, center: Point, touch: Point) -> anyhow::Result<()> {
    let limit = config.limiting_angle()?;
    let touch_angle = angle::compute_angle(center, touch);

    println!("angle      {touch_angle:.2}");
    match angle::accepted_rotation(touch_angle, limit) {
        Some(rotation) => {
            println!("dead zone  no");
            println!("rotation   {rotation:.2}");
            println!("value      {:.4}", angle::rotation_to_value(rotation, limit));
        }
        None => println!("dead zone  yes (|angle| < {limit})"),
    }
    Ok(())
}

fn print_meter(config: &Config, value: f64) -> anyhow::Result<()> {
    let meter = config.meter()?;
    let segments = meter.render(value);

    let bar: String = segments
        .iter()
        .map(|s| if s.active { '█' } else { '░' })
        .collect();
    println!("{bar}  {}/{}", meter.active_segments(value), meter.segment_count());

    for segment in &segments {
        println!(
            "{:>3} {:<3} {}",
            segment.index,
            if segment.active { "on" } else { "off" },
            hex(segment.color)
        );
    }
    Ok(())
}

fn hex(color: Srgb<f64>) -> String {
    let c: Srgb<u8> = color.into_format();
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

fn trace(config: &Config, size: Point) -> anyhow::Result<()> {
    let meter: LevelMeter = config.meter()?;
    let mut knob = KnobControl::new(config.limiting_angle()?).on_value_change(move |value| {
        println!(
            "value {value:.4} ({} bars)",
            meter.active_segments(value)
        )
    });
    knob.on_layout_size(size.x, size.y);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(kind) = parts.next() else {
            continue;
        };
        let kind = match kind.to_ascii_lowercase().as_str() {
            "down" => PointerKind::Down,
            "move" => PointerKind::Move,
            "up" => PointerKind::Up,
            _ => PointerKind::Other,
        };
        let coords: Vec<f64> = parts.filter_map(|p| p.parse().ok()).collect();
        let position = match coords.as_slice() {
            [x, y, ..] => Point::new(*x, *y),
            _ => Point::default(),
        };

        let action = knob.handle_event(kind, position);
        if !action.should_redraw {
            log::info!("{line:?} ignored, rotation stays {:.2}", knob.rotation());
        }
    }
    Ok(())
}
