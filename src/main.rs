use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use dyntree_rs::layout::Technique;
use dyntree_rs::loader;
use dyntree_rs::metrics;
use dyntree_rs::render::{self, LabelCache, RenderConfig};
use dyntree_rs::treemap::{Treemap, TreemapConfig};
use dyntree_rs::ui::input::{self, InputAction};

const USAGE: &str = "\
Usage: dyntree [OPTIONS] FILE...

Each FILE is one revision: a CSV with header `id,weight`.

Options:
  --technique NAME   squarified (default), ordered-middle, ordered-size,
                     slice-and-dice, strip, spiral, nmap-alternate, nmap-equal
  --size WxH         drawing surface in pixels (default 1080x1080)
  --margin N         inset on every side (default 80)
  --svg DIR          write one SVG per revision into DIR
  --frames N         SVG frames per transition (default 1, the final layout)
  --interactive      read keys from stdin: x advances, q quits
  --help             print this message";

/// Command-line options, layered over the config defaults.
#[derive(Debug)]
struct Options {
    config: TreemapConfig,
    svg_dir: Option<PathBuf>,
    frames: usize,
    interactive: bool,
    files: Vec<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Options>> {
    let mut options = Options {
        config: TreemapConfig::default(),
        svg_dir: None,
        frames: 1,
        interactive: false,
        files: Vec::new(),
    };

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().with_context(|| format!("{} needs a value", flag));
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--technique" => options.config.technique = value("--technique")?.parse::<Technique>()?,
            "--size" => {
                let raw = value("--size")?;
                let (w, h) = raw
                    .split_once(['x', 'X'])
                    .with_context(|| format!("--size expects WxH, got '{}'", raw))?;
                options.config.width = w.trim().parse().with_context(|| format!("bad width '{}'", w))?;
                options.config.height = h.trim().parse().with_context(|| format!("bad height '{}'", h))?;
            }
            "--margin" => {
                let raw = value("--margin")?;
                options.config.margin = raw.parse().with_context(|| format!("bad margin '{}'", raw))?;
            }
            "--svg" => options.svg_dir = Some(PathBuf::from(value("--svg")?)),
            "--frames" => {
                let raw = value("--frames")?;
                options.frames = raw.parse().with_context(|| format!("bad frame count '{}'", raw))?;
                if options.frames == 0 {
                    bail!("--frames must be at least 1");
                }
            }
            "--interactive" => options.interactive = true,
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n\n{}", flag, USAGE),
            _ => options.files.push(PathBuf::from(&arg)),
        }
    }

    let canvas = options.config.canvas();
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        bail!(
            "margin {} leaves no room in a {}x{} surface",
            options.config.margin,
            options.config.width,
            options.config.height
        );
    }
    Ok(Some(options))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("dyntree_rs=info".parse()?))
        .init();

    let Some(options) = parse_args(std::env::args().skip(1))? else {
        println!("{}", USAGE);
        return Ok(());
    };
    if options.files.is_empty() {
        bail!("no input files\n\n{}", USAGE);
    }

    let tree = loader::load_revisions(&options.files).context("Failed to load input")?;
    tracing::info!(
        "Loaded {} entities over {} revision(s)",
        tree.len(),
        tree.number_of_revisions()
    );

    if let Some(dir) = &options.svg_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut treemap = Treemap::from_config(tree, &options.config);
    let render_config = RenderConfig::default();
    let mut labels = LabelCache::new();

    treemap.compute();
    report(&treemap, &options, &render_config, &mut labels)?;

    if options.interactive {
        println!("x: next revision, q: quit");
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read stdin")?;
            match input::process_line(&line) {
                InputAction::AdvanceRevision => {
                    if treemap.advance_revision() {
                        report(&treemap, &options, &render_config, &mut labels)?;
                    } else {
                        println!("already at the last revision");
                    }
                }
                InputAction::Quit => break,
                InputAction::None => {}
            }
        }
    } else {
        while treemap.advance_revision() {
            report(&treemap, &options, &render_config, &mut labels)?;
        }
    }

    Ok(())
}

/// Print the metrics for the current revision and write its SVG frames.
fn report(treemap: &Treemap, options: &Options, render_config: &RenderConfig, labels: &mut LabelCache) -> Result<()> {
    let m = metrics::revision_metrics(treemap.tree(), treemap.revision());
    println!(
        "revision {:>3}  {:<15} aspect ratio {}  displacement {}",
        m.revision,
        treemap.technique(),
        fmt_metric(m.aspect_ratio),
        fmt_metric(m.displacement)
    );

    let Some(dir) = &options.svg_dir else {
        return Ok(());
    };
    for step in 1..=options.frames {
        let progress = step as f64 / options.frames as f64;
        let frame = render::build_frame(treemap, progress, render_config, labels);
        let name = if options.frames == 1 {
            format!("revision-{:03}.svg", treemap.revision())
        } else {
            format!("revision-{:03}-frame-{:03}.svg", treemap.revision(), step)
        };
        write_file(&dir.join(name), &render::svg::to_svg(&frame))?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn fmt_metric(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".to_string())
}
