//! talkmap - radial topic maps of recorded talks
//!
//! `talkmap view` opens the desktop viewer; `talkmap export` writes one
//! topic map as SVG.

mod app;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eframe::egui;

use talkmap::config::ViewerConfig;
use talkmap::engine::loader::load_topic;
use talkmap::engine::pipeline::RadialEngine;
use talkmap::net::HttpTalkSource;
use talkmap::render::svg::export_svg;

use app::TalkMapApp;

/// Radial topic maps of recorded talks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Talk server base URL (overrides config and TALKMAP_SERVER)
    #[arg(long, value_name = "URL", global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the desktop viewer (default)
    View,
    /// Write one topic map as SVG
    Export {
        /// Topic to lay out
        #[arg(long)]
        topic: String,
        /// Output file
        #[arg(long, value_name = "FILE", default_value = "map.svg")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match ViewerConfig::load(cli.config.as_deref(), cli.server.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Command::View) {
        Command::View => run_viewer(config),
        Command::Export { topic, out } => run_export(&config, &topic, &out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_export(config: &ViewerConfig, topic: &str, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let engine = RadialEngine::new(config.layout.clone())?;
    let source = HttpTalkSource::from_config(config)?;
    let data = load_topic(&source, topic);
    let result = engine.layout(Some(&data.central), &data.items);
    export_svg(&result, out)?;
    Ok(())
}

fn run_viewer(config: ViewerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = RadialEngine::new(config.layout.clone())?;
    let source = Arc::new(HttpTalkSource::from_config(&config)?);
    log::info!("talk server {}", source.base());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Talk Map",
        options,
        Box::new(move |cc| {
            let mut app = TalkMapApp::new(config, source, engine);
            app.fetch_topics(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| format!("viewer failed: {}", e))?;
    Ok(())
}
