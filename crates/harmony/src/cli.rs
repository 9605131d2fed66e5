use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gradient::GradientUniforms;
use crate::render;
use crate::sys::runtime;
use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use harmony_wheel::{ColorSet, Harmony, Hsv, Point, Wheel, WheelConfig, WheelEvent, parse_point};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "harmony", version, about = "Color harmony wheel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Wheel radius in pixels (overrides the config file)
    #[arg(short, long, global = true)]
    pub radius: Option<f64>,

    /// Harmony pattern: triad, tetradic, complementary, analogous or square
    #[arg(short = 'H', long, global = true)]
    pub harmony: Option<Harmony>,

    /// Starting color as 'hue,saturation[,value]'
    #[arg(short, long, global = true)]
    pub color: Option<Hsv>,

    /// How emitted color sets are printed
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the color set for the starting color, or for a pointer position
    Colors {
        /// Pointer position in pixel space as 'x,y' (clamped onto the disc)
        #[arg(short, long, value_parser = parse_point)]
        pointer: Option<Point>,
    },
    /// Render the wheel to a PNG file
    Render {
        #[arg(short, long, default_value = "wheel.png")]
        out: PathBuf,

        /// Leave out the handle markers
        #[arg(long)]
        no_handles: bool,
    },
    /// Replay wheel events, one per line, from a file or stdin
    Drag {
        /// Event script; reads stdin when omitted
        script: Option<PathBuf>,
    },
    /// List the harmony patterns and their hue offsets
    Harmonies,
    /// Listen for wheel events on a Unix socket and follow config changes
    Serve {
        /// Socket path (overrides the config file)
        #[arg(short, long)]
        socket: Option<PathBuf>,
    },
    /// Write the default config file if none exists
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Gradient,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn wheel_config(&self, config: &Config) -> WheelConfig {
        let base = &config.wheel;
        WheelConfig {
            radius: self.radius.unwrap_or(base.radius),
            harmony: self.harmony.unwrap_or(base.harmony),
            controlled: base.controlled,
            color: self.color.or(base.color),
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_or_default();
    let wheel_config = cli.wheel_config(&config);
    log::debug!("Wheel config: {:?}", wheel_config);

    match cli.command {
        Commands::Colors { pointer } => {
            let mut wheel = Wheel::new(&wheel_config)?;
            let colors = match pointer {
                Some(p) => wheel.set_position_from_pointer(p),
                None => wheel.color_set(),
            };
            print_colors(cli.format, &colors)
        }
        Commands::Render { out, no_handles } => {
            let mut wheel = Wheel::new(&wheel_config)?;
            render::render_png(&mut wheel, &out, !no_handles)
                .with_context(|| format!("Failed to render {}", out.display()))
        }
        Commands::Drag { script } => {
            let reader: Box<dyn BufRead> = match &script {
                Some(path) => Box::new(std::io::BufReader::new(fs_err::File::open(path)?)),
                None => Box::new(std::io::stdin().lock()),
            };
            replay(&wheel_config, reader, cli.format)
        }
        Commands::Harmonies => {
            for harmony in Harmony::iter() {
                let offsets: Vec<String> =
                    harmony.offsets().iter().map(|o| o.to_string()).collect();
                println!("{:<14} [{}]", harmony.to_string(), offsets.join(", "));
            }
            Ok(())
        }
        Commands::Serve { socket } => {
            let socket = socket.unwrap_or(config.serve.socket);
            serve(wheel_config, socket, cli.format)
        }
        Commands::Init => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Applies every scripted event to a fresh wheel; the listener prints each emission.
fn replay(config: &WheelConfig, reader: impl BufRead, format: OutputFormat) -> anyhow::Result<()> {
    let mut wheel = Wheel::new(config)?;
    wheel.on_change(emitter(format));

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: WheelEvent = line
            .parse()
            .with_context(|| format!("line {}: '{}'", n + 1, line))?;
        wheel.handle(event)?;
    }
    Ok(())
}

fn serve(wheel_config: WheelConfig, socket: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let mut wheel = Wheel::new(&wheel_config)?;
    wheel.on_change(emitter(format));

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(socket, tx);

    // the wheel stays on this thread; background tasks only forward events
    while let Ok(event) = rx.recv_blocking() {
        match event {
            AppEvent::Wheel(event) => {
                if let Err(e) = wheel.handle(event) {
                    log::warn!("Rejected {:?}: {}", event, e);
                }
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    apply_config(&mut wheel, &new_config.wheel);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
    Ok(())
}

/// Brings a running wheel in line with a reloaded config file. Later writes win, so a reload
/// overrides whatever was dragged or sent over the socket.
fn apply_config(wheel: &mut Wheel, config: &WheelConfig) {
    if config.radius != wheel.frame().radius()
        && let Err(e) = wheel.resize(config.radius)
    {
        log::warn!("Keeping radius {}: {}", wheel.frame().radius(), e);
    }
    if config.harmony != wheel.harmony() {
        wheel.set_harmony(config.harmony);
    }
    wheel.set_controlled(config.controlled);
    if let Some(color) = config.color {
        wheel.sync_color(color);
    }
}

fn emitter(format: OutputFormat) -> impl FnMut(&ColorSet) {
    move |colors| {
        if let Err(e) = print_colors(format, colors) {
            log::error!("Failed to print colors: {}", e);
        }
    }
}

pub fn format_colors(format: OutputFormat, colors: &ColorSet) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => colors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let label = if i == 0 { "primary".to_string() } else { format!("#{i}") };
                format!(
                    "{:<8} hue {:>6.2}  sat {:.3}  val {:.3}  {}",
                    label,
                    c.hue,
                    c.saturation,
                    c.value,
                    c.hex()
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string(colors)?,
        OutputFormat::Gradient => serde_json::to_string(&GradientUniforms::from_colors(colors))?,
    })
}

fn print_colors(format: OutputFormat, colors: &ColorSet) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", format_colors(format, colors)?)?;
    out.flush()?;
    Ok(())
}
