use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pose_overlay::{CoordinateSpace, Drawing, Keypoint, OverlayOptions, PoseOverlay};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use structopt::StructOpt;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Format {
    Json,
    Svg,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            other => Err(anyhow!("unknown output format: {}", other)),
        }
    }
}

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON lines file with one frame of keypoints (or null) per line. Reads stdin if omitted.
    input: Option<PathBuf>,

    /// Viewport width.
    #[structopt(short, long, default_value = "640")]
    width: f32,

    /// Viewport height.
    #[structopt(short = "H", long, default_value = "480")]
    height: f32,

    /// Flip horizontally, for front camera footage.
    #[structopt(short, long)]
    mirror: bool,

    /// Keypoint score threshold.
    #[structopt(short = "s", long, default_value = "0.8")]
    min_score: f32,

    /// Keypoint coordinates are fractions of the viewport instead of pixels.
    #[structopt(short, long)]
    normalized: bool,

    /// Output format: one JSON drawing per line on stdout, or one SVG file per frame.
    #[structopt(short, long, default_value = "json", possible_values = &["json", "svg"])]
    format: Format,

    /// Directory for SVG output.
    #[structopt(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Show each frame in a window (requires the `gui` feature).
    #[structopt(long)]
    show: bool,

    #[structopt(short = "W", long, default_value = "1")]
    wait_key_ms: i32,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short = "p", long)]
    show_progress: bool,
}

fn parse_frame(line: &str) -> Result<Option<Vec<Keypoint>>> {
    Ok(serde_json::from_str(line)?)
}

fn write_frame<W>(
    format: Format,
    out_dir: &Path,
    frame_num: usize,
    drawing: Option<&Drawing>,
    out: &mut W,
) -> Result<()>
where
    W: Write,
{
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, &drawing).context("failed serializing drawing")?;
            writeln!(out).context("failed writing newline")?;
        }
        Format::Svg => {
            if let Some(drawing) = drawing {
                let path = out_dir.join(format!("frame_{:06}.svg", frame_num));
                std::fs::write(&path, drawing.to_svg())
                    .with_context(|| format!("failed writing {}", path.display()))?;
                debug!(message = "wrote frame", path = %path.display());
            }
        }
    }
    Ok(())
}

#[cfg(feature = "gui")]
fn wait_q(delay_ms: i32) -> Result<bool> {
    const Q_KEY: u8 = b'q';
    Ok(opencv::highgui::wait_key(delay_ms)? != i32::from(Q_KEY))
}

#[cfg(feature = "gui")]
fn display(drawing: Option<&Drawing>, wait_key_ms: i32) -> Result<bool> {
    use pose_overlay::raster;

    if let Some(drawing) = drawing {
        let mut frame = raster::blank_frame(drawing)?;
        raster::draw(drawing, &mut frame).context("failed drawing pose")?;
        raster::show("poses", &frame)?;
    }
    wait_q(wait_key_ms).context("failed waiting for 'q' key")
}

#[cfg(not(feature = "gui"))]
fn display(_drawing: Option<&Drawing>, _wait_key_ms: i32) -> Result<bool> {
    Ok(true)
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    if opt.show && cfg!(not(feature = "gui")) {
        warn!("--show has no effect without the `gui` feature");
    }

    let overlay = PoseOverlay::new(OverlayOptions {
        mirror: opt.mirror,
        min_score: opt.min_score,
        space: if opt.normalized {
            CoordinateSpace::Normalized
        } else {
            CoordinateSpace::Pixel
        },
    });
    info!(
        message = "rendering overlay",
        width = opt.width,
        height = opt.height,
        options = ?overlay.options()
    );

    if opt.format == Format::Svg {
        std::fs::create_dir_all(&opt.out_dir)
            .with_context(|| format!("failed creating {}", opt.out_dir.display()))?;
    }

    let reader: Box<dyn BufRead> = match &opt.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let pb = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut nframes = 0_usize;
    let mut ndrawn = 0_usize;

    for (line_num, line) in reader.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line = line.with_context(|| format!("failed reading line {}", line_num + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let keypoints = parse_frame(&line)
            .with_context(|| format!("failed parsing frame on line {}", line_num + 1))?;
        let drawing = overlay.render(keypoints.as_deref(), opt.width, opt.height);

        write_frame(opt.format, &opt.out_dir, nframes, drawing.as_ref(), &mut out)?;

        if opt.show && !display(drawing.as_ref(), opt.wait_key_ms)? {
            running.store(false, Ordering::SeqCst);
        }

        nframes += 1;
        if drawing.is_some() {
            ndrawn += 1;
        }

        if let Some(pb) = pb.as_ref() {
            pb.set_message(format!("frames: {}, drawn: {}", nframes, ndrawn));
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    out.flush().context("failed flushing output")?;

    info!(message = "done", frames = nframes, drawn = ndrawn);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_frame, write_frame, Format};
    use pose_overlay::{render, Keypoint, OverlayOptions};
    use std::{fs, path::Path};

    #[test]
    fn format_from_str() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("svg".parse::<Format>().unwrap(), Format::Svg);
        assert!("png".parse::<Format>().is_err());
    }

    #[test]
    fn null_frame_has_no_keypoints() {
        assert_eq!(parse_frame("null").unwrap(), None);
    }

    #[test]
    fn frame_of_keypoints() {
        let frame = parse_frame(r#"[{"name":"nose","x":1,"y":2,"score":0.5}]"#).unwrap();
        assert_eq!(frame, Some(vec![Keypoint::new("nose", 1.0, 2.0, 0.5)]));
    }

    #[test]
    fn malformed_frame() {
        assert!(parse_frame(r#"[{"name":"nose"}]"#).is_err());
    }

    #[test]
    fn json_output_is_one_line_per_frame() {
        let keypoints = vec![Keypoint::new("nose", 1.0, 2.0, 0.9)];
        let drawing = render(
            Some(keypoints.as_slice()),
            10.0,
            10.0,
            &OverlayOptions::default(),
        );
        let mut out = Vec::new();
        write_frame(Format::Json, Path::new("."), 0, drawing.as_ref(), &mut out).unwrap();
        write_frame(Format::Json, Path::new("."), 1, None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""kind":"circle""#));
        assert_eq!(lines[1], "null");
    }

    #[test]
    fn svg_output_writes_one_file_per_drawn_frame() {
        let out_dir = std::env::temp_dir().join(format!("pose-overlay-svg-{}", std::process::id()));
        fs::create_dir_all(&out_dir).unwrap();

        let keypoints = vec![Keypoint::new("nose", 1.0, 2.0, 0.9)];
        let drawing = render(
            Some(keypoints.as_slice()),
            10.0,
            10.0,
            &OverlayOptions::default(),
        );
        let mut out = Vec::new();
        write_frame(Format::Svg, &out_dir, 0, drawing.as_ref(), &mut out).unwrap();
        write_frame(Format::Svg, &out_dir, 1, None, &mut out).unwrap();

        let mut files = fs::read_dir(&out_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        files.sort();
        let svg = fs::read_to_string(out_dir.join("frame_000000.svg")).unwrap();
        fs::remove_dir_all(&out_dir).unwrap();

        assert_eq!(files, vec!["frame_000000.svg".to_owned()]);
        assert!(svg.contains(r#"pointer-events="none""#));
        assert!(out.is_empty());
    }
}
