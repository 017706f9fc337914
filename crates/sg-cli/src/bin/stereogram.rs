use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::warn;
use serde::{Deserialize, Serialize};
use stereogram::{
    Click, Compositor, Eye, FsStore, PickError, Point2f, PointPicker, ScriptedPicker,
    SessionConfig, StereoError, StereoSession,
};

#[derive(Parser, Debug)]
#[command(name = "stereogram")]
#[command(about = "Combine left-eye and right-eye photographs into stereograms")]
struct Cli {
    /// Skip the alignment step (assumes the photographs are already aligned)
    #[arg(short, long)]
    auto: bool,

    /// Feature position in the left image, skipping the interactive prompt
    #[arg(
        long,
        value_name = "X,Y",
        value_parser = parse_point,
        requires = "right_point",
        conflicts_with = "auto"
    )]
    left_point: Option<Point2f>,

    /// Feature position in the right image, skipping the interactive prompt
    #[arg(
        long,
        value_name = "X,Y",
        value_parser = parse_point,
        requires = "left_point",
        conflicts_with = "auto"
    )]
    right_point: Option<Point2f>,

    /// Compositor to run (sidebyside or bluered); repeat for several.
    /// Defaults to both, side-by-side first.
    #[arg(long = "compositor", value_name = "LABEL")]
    compositors: Vec<Compositor>,

    /// JSON file with output settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the composites
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Leading part of every output file name
    #[arg(long)]
    prefix: Option<String>,

    /// Output extension, which also picks the encoder
    #[arg(long)]
    extension: Option<String>,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Photograph taken for the left eye
    left: PathBuf,

    /// Photograph taken for the right eye
    right: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = session_config(&cli)?;
    println!("Creating a stereo image from your two input images!");
    let mut session = StereoSession::open(&cli.left, &cli.right, config.clone())
        .context("reading input images")?;

    if let (Some(left), Some(right)) = (cli.left_point, cli.right_point) {
        session
            .align_with(&mut ScriptedPicker::from_points(left, right))
            .context("aligning images on the given points")?;
    } else if !cli.auto {
        let stdin = io::stdin();
        let mut picker = PromptPicker::new(stdin.lock(), io::stdout());
        align_interactively(&mut session, &mut picker)?;
    }

    let compositors = if cli.compositors.is_empty() {
        Compositor::ALL.to_vec()
    } else {
        cli.compositors.clone()
    };

    let mut store = FsStore::new(&config.output_dir);
    let outputs = session
        .write_all(&compositors, &mut store)
        .context("writing stereo images")?;
    for out in &outputs {
        println!(
            "  {} {}x{} -> {}",
            out.compositor,
            out.width,
            out.height,
            out.path.display()
        );
    }

    if let Some(path) = &cli.report {
        write_json(path, &session.report(&outputs))?;
    }

    println!("Done! Put on your glasses and check out your stereogram!");
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn session_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => read_json(path)?,
        None => SessionConfig::default(),
    };
    if let Some(dir) = &cli.out_dir {
        config.output_dir = dir.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(ext) = &cli.extension {
        config.extension = ext.trim_start_matches('.').to_string();
    }
    if config.extension.is_empty() {
        bail!("output extension must not be empty.");
    }
    Ok(config)
}

/// Keeps asking until one click lands in each image.
fn align_interactively<P: PointPicker>(session: &mut StereoSession, picker: &mut P) -> Result<()> {
    loop {
        match session.align_with(picker) {
            Ok(_) => return Ok(()),
            Err(StereoError::AmbiguousCorrespondence { eye }) => {
                warn!("both clicks were on the {eye} image; click once in each image");
            }
            Err(StereoError::InvalidCoordinate { eye, x, y }) => {
                warn!("({x}, {y}) is outside the {eye} image; click inside it");
            }
            Err(err) => return Err(err).context("aligning images"),
        }
    }
}

/// Reads clicks as `<left|right> X Y` lines, one per image.
struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> PointPicker for PromptPicker<R, W> {
    fn pick(
        &mut self,
        left: &stereogram::Frame,
        right: &stereogram::Frame,
    ) -> Result<Vec<Click>, PickError> {
        writeln!(
            self.output,
            " Please identify the same feature in both images \
             (left is {}x{}, right is {}x{}).",
            left.width(),
            left.height(),
            right.width(),
            right.height()
        )?;
        writeln!(
            self.output,
            "  (the images will be aligned on this feature, to draw the viewer's focus)"
        )?;

        let mut clicks = Vec::with_capacity(2);
        while clicks.len() < 2 {
            write!(self.output, "  <left|right> X Y> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PickError::Cancelled);
            }
            match parse_click(&line) {
                Ok(click) => {
                    writeln!(
                        self.output,
                        "  You clicked the {} image at ({}, {})",
                        click.eye, click.position.x, click.position.y
                    )?;
                    clicks.push(click);
                }
                Err(msg) => writeln!(self.output, "  {msg}. Could you please try again?")?,
            }
        }
        Ok(clicks)
    }
}

fn parse_click(line: &str) -> Result<Click, String> {
    let mut parts = line.split_whitespace();
    let eye: Eye = parts.next().ok_or("expected an image name")?.parse()?;
    let rest: Vec<&str> = parts.collect();
    let point = match rest.as_slice() {
        [xy] => parse_point(xy)?,
        [x, y] => parse_point(&format!("{x},{y}"))?,
        _ => return Err("expected a coordinate as 'X Y' or 'X,Y'".to_string()),
    };
    Ok(Click {
        eye,
        position: point,
    })
}

fn parse_point(s: &str) -> Result<Point2f, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("'{s}' is not of the form X,Y"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{}' is not a finite number", v.trim()))
    };
    Ok(Point2f::new(coord(x)?, coord(y)?))
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::Parser;
    use stereogram::{Compositor, Eye, Frame, Image, Offset, PickError, PointPicker, SessionConfig};

    use super::{Cli, PromptPicker, align_interactively, parse_click, parse_point};

    fn frame() -> Frame {
        Frame::from(Image::new_fill(100, 80, [0u8, 0, 0]))
    }

    #[test]
    fn points_parse_from_pairs() {
        let p = parse_point("50,40.5").expect("valid point");
        assert_eq!((p.x, p.y), (50.0, 40.5));
        assert!(parse_point("50").is_err());
        assert!(parse_point("nan,1").is_err());
    }

    #[test]
    fn clicks_parse_in_both_notations() {
        let a = parse_click("left 50 40\n").expect("space separated");
        let b = parse_click("right 55,42").expect("comma separated");
        assert_eq!(a.eye, Eye::Left);
        assert_eq!((b.position.x, b.position.y), (55.0, 42.0));
        assert!(parse_click("up 1 2").is_err());
        assert!(parse_click("left").is_err());
    }

    #[test]
    fn prompt_picker_skips_bad_lines() {
        let input = Cursor::new("nonsense\nleft 50 40\nright 55 42\n");
        let mut out = Vec::new();
        let mut picker = PromptPicker::new(input, &mut out);
        let clicks = picker.pick(&frame(), &frame()).expect("two clicks");
        assert_eq!(clicks.len(), 2);

        let text = String::from_utf8(out).expect("utf8 prompt");
        assert!(text.contains("try again"));
        assert!(text.contains("You clicked the right image"));
    }

    #[test]
    fn prompt_picker_cancels_on_eof() {
        let mut picker = PromptPicker::new(Cursor::new("left 1 1\n"), Vec::new());
        let err = picker.pick(&frame(), &frame()).expect_err("input ends early");
        assert!(matches!(err, PickError::Cancelled));
    }

    #[test]
    fn interactive_alignment_asks_again_after_ambiguous_clicks() {
        let pair = stereogram::StereoPair::new(frame(), frame());
        let mut session = stereogram::StereoSession::new(pair, SessionConfig::default());
        let input = Cursor::new("left 1 1\nleft 2 2\nleft 50 40\nright 55 42\n");
        let mut picker = PromptPicker::new(input, Vec::new());

        align_interactively(&mut session, &mut picker).expect("second round succeeds");
        assert_eq!(session.offset(), Offset::new(5, 2));
    }

    #[test]
    fn interactive_alignment_asks_again_after_off_image_click() {
        let pair = stereogram::StereoPair::new(frame(), frame());
        let mut session = stereogram::StereoSession::new(pair, SessionConfig::default());
        let input = Cursor::new("left -3 4\nright 1 1\nleft 3 4\nright 1 1\n");
        let mut picker = PromptPicker::new(input, Vec::new());

        align_interactively(&mut session, &mut picker).expect("second round succeeds");
        assert_eq!(session.offset(), Offset::new(-2, -3));
    }

    #[test]
    fn cli_requires_two_images() {
        assert!(Cli::try_parse_from(["stereogram", "left.jpg"]).is_err());
        assert!(Cli::try_parse_from(["stereogram", "a.jpg", "b.jpg", "c.jpg"]).is_err());

        let cli = Cli::try_parse_from(["stereogram", "--auto", "l.jpg", "r.jpg"])
            .expect("valid invocation");
        assert!(cli.auto);
        assert!(cli.compositors.is_empty());
    }

    #[test]
    fn cli_point_flags_come_in_pairs() {
        assert!(Cli::try_parse_from(["stereogram", "--left-point", "1,2", "l.jpg", "r.jpg"]).is_err());
        assert!(
            Cli::try_parse_from([
                "stereogram",
                "--auto",
                "--left-point",
                "1,2",
                "--right-point",
                "3,4",
                "l.jpg",
                "r.jpg"
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from([
            "stereogram",
            "--left-point",
            "1,2",
            "--right-point",
            "3,4",
            "--compositor",
            "bluered",
            "l.jpg",
            "r.jpg",
        ])
        .expect("valid invocation");
        assert_eq!(cli.compositors, vec![Compositor::Anaglyph]);
    }
}
