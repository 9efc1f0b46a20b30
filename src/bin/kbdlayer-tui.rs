// Kbdlayer TUI
// Interactive harness: type on a US-QWERTY terminal, see what the layout commits

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use kbdlayer_core::Settings;

#[path = "../tui/mod.rs"]
mod tui;

/// Interactive keyboard layout tester
#[derive(Parser, Debug)]
#[command(name = "kbdlayer-tui")]
#[command(version)]
#[command(about = "Try a keyboard layout descriptor in the terminal", long_about = None)]
struct Args {
    /// Layout descriptor (JSON, or TOML by extension)
    #[arg(short, long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Settings file (default: ~/.config/kbdlayer/settings.toml)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("Failed to load default settings")?,
    };

    let Some(layout_path) = args.layout.or_else(|| settings.layout_path()) else {
        bail!("No layout given: pass --layout or set [layout] path in the settings file");
    };

    tui::run(&layout_path, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["kbdlayer-tui", "--layout", "layouts/se.json"]);
        assert_eq!(args.layout, Some(PathBuf::from("layouts/se.json")));
        assert!(args.settings.is_none());
    }
}
