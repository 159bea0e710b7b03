//! PlaceSync CLI - inspect KiCad legacy schematics and the placements
//! they resolve to.

use clap::{Parser, Subcommand, ValueEnum};
use placesync::{PlaceSyncCore, Schematic};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "placesync")]
#[command(about = "KiCad legacy schematic placement extraction", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the flattened reference -> placement map of a hierarchy
    Locations {
        /// Path to the root .sch file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Summarize a schematic file and its sheet hierarchy
    Info {
        /// Path to the root .sch file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Locations { file, format } => handle_locations(&file, format),
        Commands::Info { file, format } => handle_info(&file, format),
    };

    process::exit(exit_code);
}

fn handle_locations(file: &PathBuf, format: OutputFormat) -> i32 {
    match PlaceSyncCore::resolve_locations(file) {
        Ok(locations) => {
            let mut refs: Vec<_> = locations.keys().collect();
            refs.sort();
            match format {
                OutputFormat::Human => {
                    println!("Placements from {}:", file.display());
                    for reference in refs {
                        let p = &locations[reference];
                        println!(
                            "  {:<8} {:<20} ({}, {}) mils, {} deg",
                            reference, p.name, p.x, p.y, p.degrees
                        );
                    }
                }
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "file": file.display().to_string(),
                        "placements": refs.iter().map(|r| {
                            let p = &locations[*r];
                            serde_json::json!({
                                "reference": r,
                                "name": p.name,
                                "x": p.x,
                                "y": p.y,
                                "degrees": p.degrees,
                            })
                        }).collect::<Vec<_>>(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_info(file: &PathBuf, format: OutputFormat) -> i32 {
    let schematic = match placesync::parse_schematic(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match format {
        OutputFormat::Human => print_info_human(&schematic, 0),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&info_json(&schematic)).unwrap()
            );
        }
    }
    0
}

fn print_info_human(sch: &Schematic, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{}File: {}", indent, sch.path.display());
    if !sch.header_valid {
        println!("{}  (not a recognized schematic file)", indent);
        return;
    }
    println!("{}  components:  {}", indent, sch.components.len());
    println!("{}  sheets:      {}", indent, sch.sheets.len());
    println!(
        "{}  wires/texts: {}/{}",
        indent,
        sch.wires.len(),
        sch.texts.len()
    );
    for sheet in &sch.sheets {
        print_info_human(&sheet.schematic, depth + 1);
    }
}

fn info_json(sch: &Schematic) -> serde_json::Value {
    serde_json::json!({
        "file": sch.path.display().to_string(),
        "header_valid": sch.header_valid,
        "components": sch.components.len(),
        "wires": sch.wires.len(),
        "texts": sch.texts.len(),
        "connections": sch.connections.len(),
        "sheets": sch.sheets.iter().map(|s| info_json(&s.schematic)).collect::<Vec<_>>(),
    })
}
