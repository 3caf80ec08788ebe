//! Deck Planner
//!
//! Headless driver for the deck planner: previews the layout, shows the
//! material request and runs it against the configured service.

mod logging;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::error;

use deck_planner::app::Completion;
use deck_planner::layout::{DEFAULT_PADDING, compute_layout, preview_area};
use deck_planner::{
    DeckDimensions, DeckMaterial, GeminiClient, MaterialModel, Planner, PlannerError,
    build_request, parse_response, render_catalog, svg,
};

#[derive(Parser)]
#[command(name = "deck-planner")]
#[command(about = "Plan a residential deck: layout preview and bill of materials")]
struct Cli {
    #[command(flatten)]
    deck: DeckArgs,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DeckArgs {
    /// Deck length in feet (4-100)
    #[arg(long, default_value = "12")]
    length: f64,

    /// Deck width in feet (4-100)
    #[arg(long, default_value = "10")]
    width: f64,

    /// Height off the ground in inches (4-120)
    #[arg(long, default_value = "24")]
    height: f64,

    /// Surface material: pressure-treated, cedar, redwood or composite
    #[arg(long, default_value = "pressure-treated")]
    material: DeckMaterial,

    /// Extra requirements passed along with the request
    #[arg(long)]
    notes: Option<String>,
}

impl DeckArgs {
    fn dimensions(&self) -> DeckDimensions {
        let dims = DeckDimensions::clamped(self.length, self.width, self.height, self.material);
        match &self.notes {
            Some(notes) => dims.with_details(notes.as_str()),
            None => dims,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the top-down preview as SVG
    Preview {
        /// Width of the preview container in pixels
        #[arg(long, default_value = "640")]
        container_width: f64,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a summary of the preview geometry
    Layout {
        /// Width of the preview container in pixels
        #[arg(long, default_value = "640")]
        container_width: f64,
    },

    /// Show the request that would be sent to the material service
    Prompt {
        /// Print the full request (prompt, schema, temperature) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the bill of materials with the configured service
    Generate {
        /// Also save the raw service response to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Display a previously saved service response
    Render {
        /// Path to the saved JSON response
        file: PathBuf,
    },

    /// List the available deck materials
    Materials,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let dimensions = cli.deck.dimensions();

    match cli.command {
        Commands::Preview {
            container_width,
            output,
        } => {
            let (width, height) = preview_area(container_width);
            let layout = compute_layout(&dimensions, width, height, DEFAULT_PADDING);
            write_output(output.as_deref(), &svg::render_svg(&layout))?;
        }

        Commands::Layout { container_width } => {
            let (width, height) = preview_area(container_width);
            let layout = compute_layout(&dimensions, width, height, DEFAULT_PADDING);
            println!(
                "Deck: {} ft x {} ft, {} in high, {}",
                dimensions.length, dimensions.width, dimensions.height, dimensions.material
            );
            println!("{}", layout);
        }

        Commands::Prompt { json } => {
            let request = build_request(&dimensions);
            if json {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                println!("{}", request.prompt);
            }
        }

        Commands::Generate { save } => {
            let client = match GeminiClient::from_env() {
                Ok(client) => client,
                Err(err) => {
                    error!("{err}");
                    eprintln!("{}", err.user_message());
                    return Ok(ExitCode::FAILURE);
                }
            };

            let recorder = Recorder {
                inner: client,
                last: None,
            };
            let mut planner = Planner::new(recorder, dimensions);
            let completion = planner.generate();
            let state = planner.state().clone();

            if let (Some(path), Some(raw)) = (save, planner.into_model().last) {
                write_output(Some(&path), &raw)?;
            }

            if completion != Completion::Applied {
                eprintln!("{}", state.error().unwrap_or("Material generation did not complete."));
                return Ok(ExitCode::FAILURE);
            }
            print!("{}", render_catalog(state.catalog()));
        }

        Commands::Render { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            match parse_response(&raw) {
                Ok(catalog) => print!("{}", render_catalog(Some(&catalog))),
                Err(err) => {
                    error!("{}: {err}", file.display());
                    eprintln!("{}", err.user_message());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Materials => {
            for material in DeckMaterial::ALL {
                println!("{:<25} {}", material.label(), material.option_label());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Keeps the raw text of the last successful model call.
struct Recorder<M> {
    inner: M,
    last: Option<String>,
}

impl<M: MaterialModel> MaterialModel for Recorder<M> {
    fn generate(
        &mut self,
        request: &deck_planner::MaterialRequest,
    ) -> Result<String, PlannerError> {
        let raw = self.inner.generate(request)?;
        self.last = Some(raw.clone());
        Ok(raw)
    }
}

/// Write to a file, or stdout when no path is given.
fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(contents.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}
