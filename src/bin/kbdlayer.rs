// Kbdlayer CLI
// Line-oriented harness: reads event expressions from stdin, prints what the
// layout commits for each of them

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use kbdlayer_core::{
    default_settings_content, parse_event_string, Layout, Settings, TransformEngine,
    TransformResult,
};

/// Keyboard layer and dead-key resolver
#[derive(Parser, Debug)]
#[command(name = "kbdlayer")]
#[command(author = "kbdlayer contributors")]
#[command(version)]
#[command(about = "Resolve key events against a keyboard layout descriptor", long_about = None)]
struct Args {
    /// Layout descriptor (JSON, or TOML by extension)
    #[arg(short, long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Settings file (default: ~/.config/kbdlayer/settings.toml)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate the layout, print a summary and exit
    #[arg(long)]
    check_layout: bool,

    /// Print the active layer next to each output
    #[arg(long)]
    show_layer: bool,

    /// Echo the key code of keys the layout does not define
    #[arg(long)]
    passthrough: bool,

    /// Print a starter settings file and exit
    #[arg(long)]
    print_default_settings: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Settings file merged with command-line overrides
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("Failed to load default settings")?,
    };

    if args.show_layer {
        settings.set_show_layer(true);
    }
    if args.passthrough {
        settings.set_passthrough_unmapped(true);
    }
    Ok(settings)
}

/// `--layout` wins over the settings file
fn load_layout(args: &Args, settings: &Settings) -> Result<Layout> {
    let Some(path) = args.layout.clone().or_else(|| settings.layout_path()) else {
        bail!("No layout given: pass --layout or set [layout] path in the settings file");
    };
    Layout::from_path(&path).with_context(|| format!("Failed to load layout {}", path.display()))
}

/// Summary of what the layout contains, one line per entry
fn summarize(layout: &Layout) -> Vec<String> {
    let mut lines = vec!["Layout is valid".to_string()];
    for name in layout.layer_names() {
        let keys = layout.layer(name).map_or(0, |layer| layer.len());
        let mut line = format!("  {:<16} {} keys", name, keys);

        let mut dead: Vec<&str> = layout
            .dead_keys(name)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        dead.sort_unstable();
        if !dead.is_empty() {
            line.push_str(&format!(", dead keys {:?}", dead));
        }
        if let Some(space) = layout.space(name) {
            line.push_str(&format!(", space {:?}", space));
        }
        lines.push(line);
    }
    lines.push(format!(
        "  {} transform table(s), chains up to {} dead key(s)",
        layout.transform_count(),
        layout.max_transform_depth()
    ));
    lines
}

/// Format one engine result for output, `None` when nothing is printed
fn render(result: &TransformResult, code: &str, layer: &str, settings: &Settings) -> Option<String> {
    let text = match result {
        TransformResult::Text(text) | TransformResult::Composed(text) => text.clone(),
        TransformResult::Unmapped if settings.passthrough_unmapped() => code.to_string(),
        TransformResult::Suppress if settings.show_layer() => {
            return Some(format!("[{}] (dead key)", layer));
        }
        _ => return None,
    };

    if settings.show_layer() {
        Some(format!("[{}] {}", layer, text))
    } else {
        Some(text)
    }
}

fn run(engine: &mut TransformEngine, settings: &Settings) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event = match parse_event_string(line) {
            Ok(event) => event,
            Err(e) => {
                eprintln!("Invalid event '{}': {}", line, e);
                continue;
            }
        };

        let result = engine.process_event(&event);
        let layer = engine.active_layer(&event.modifiers);
        if let Some(output) = render(&result, event.code.as_str(), &layer, settings) {
            writeln!(out, "{}", output)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.print_default_settings {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let settings = load_settings(&args)?;
    let layout = load_layout(&args, &settings)?;

    if args.check_layout {
        for line in summarize(&layout) {
            println!("{}", line);
        }
        return Ok(());
    }

    log::info!(
        "Loaded layout with {} layer(s), dead keys {}",
        layout.layer_names().count(),
        if layout.has_dead_keys() { "enabled" } else { "disabled" }
    );

    let mut engine = TransformEngine::with_config(Arc::new(layout), settings.to_transform_config());
    run(&mut engine, &settings)
}
