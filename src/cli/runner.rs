use std::io::BufRead;
use std::path::Path;

use clap::Parser;
use serde_json::json;
use tracing::level_filters::LevelFilter;
use tracing::warn;

use crate::config::ClientConfig;
use crate::gallery::{GalleryState, NavKey};
use crate::processing::SourceRef;
use crate::runtime::{AppContext, ProcessRequest};

use super::types::{Cli, Commands, ProcessArgs, ToolsCommand};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Gallery { images, start } = &cli.command {
        return run_gallery(images.clone(), *start);
    }

    let config = load_config(cli.config.as_deref(), cli.base_url, cli.token)?;
    let app = AppContext::new(config).map_err(|error| error.to_string())?;

    match cli.command {
        Commands::Tools { command } => match command {
            ToolsCommand::List => {
                let tools = app.catalog_service().list();
                print_json(&tools)?;
            }
            ToolsCommand::Show { tool } => {
                let descriptor = app
                    .catalog_service()
                    .describe(&tool)
                    .map_err(|error| error.to_string())?;
                print_json(descriptor)?;
            }
        },
        Commands::Process(args) => {
            let output = app
                .process_service()
                .process(&process_request(args))
                .map_err(|error| error.to_string())?;
            print_json(&output)?;
        }
        Commands::Preview { input } => {
            let preview = app
                .process_service()
                .preview(&input)
                .map_err(|error| error.to_string())?;
            println!("{}", preview.as_str());
        }
        Commands::CheckUrl { url } => {
            let check = app
                .process_service()
                .check_url(&url)
                .map_err(|error| error.to_string())?;
            print_json(&check)?;
        }
        Commands::Run { job, report } => {
            let run_report = app
                .job_service()
                .run_file(&job)
                .map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                app.job_service()
                    .save_report(report_path, &run_report)
                    .map_err(|error| error.to_string())?;
            }
            print_json(&run_report)?;
            if run_report.failed > 0 {
                return Err(format!(
                    "{} of {} steps failed",
                    run_report.failed,
                    run_report.steps.len()
                ));
            }
        }
        Commands::Gallery { .. } => {}
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(
    path: Option<&Path>,
    base_url: Option<String>,
    token: Option<String>,
) -> Result<ClientConfig, String> {
    let mut config = match path {
        Some(path) => ClientConfig::load(path).map_err(|error| error.to_string())?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if token.is_some() {
        config.token = token;
    }
    Ok(config)
}

fn process_request(args: ProcessArgs) -> ProcessRequest {
    let primary = match (args.file, args.url) {
        (Some(file), _) => SourceRef::File(file),
        (None, url) => SourceRef::Url(url.unwrap_or_default()),
    };
    let secondary = match (args.overlay_file, args.overlay_url) {
        (Some(file), _) => Some(SourceRef::File(file)),
        (None, Some(url)) => Some(SourceRef::Url(url)),
        (None, None) => None,
    };
    ProcessRequest {
        tool: args.tool,
        primary,
        secondary,
        assignments: args.settings,
        defaults: args.defaults,
        output: args.output,
    }
}

fn run_gallery(images: Vec<String>, start: usize) -> Result<(), String> {
    let mut gallery = GalleryState::new(images);
    if !gallery.open(start) {
        return Err(format!(
            "start index {start} is outside the {} images",
            gallery.len()
        ));
    }
    print_shown(&gallery);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|error| error.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        match NavKey::parse(&line) {
            Some(key) => {
                gallery.handle_key(key);
            }
            None => {
                warn!(key = %line.trim(), "ignoring unknown key");
                continue;
            }
        }
        if !gallery.is_open() {
            break;
        }
        print_shown(&gallery);
    }
    Ok(())
}

fn print_shown(gallery: &GalleryState<String>) {
    if let Some(image) = gallery.current() {
        println!(
            "{}",
            json!({"index": gallery.current_index(), "total": gallery.len(), "image": image})
        );
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}
