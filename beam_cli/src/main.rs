//! # Beam CLI
//!
//! Reads a beam description as JSON and prints the reactions, extreme values
//! and (optionally) the sampled diagrams.
//!
//! ## Usage
//!
//! ```text
//! beam_cli [-d|--diagrams] [INPUT]
//! ```
//!
//! Without a path the input is read from stdin. Set `RUST_LOG=debug` to trace
//! the analysis stages.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use beam_core::calculations::Diagram;
use beam_core::{AnalysisResults, Beam, BeamInput, CalcError, CalcResult};
use clap::Parser;
use serde::Serialize;

/// JSON written to stdout on success
#[derive(Serialize)]
struct Output<'a> {
    label: &'a str,
    span: f64,
    reaction_left: f64,
    reaction_right: f64,
    max_shear: f64,
    max_shear_position: f64,
    max_moment: f64,
    max_moment_position: f64,
    min_moment: f64,
    min_moment_position: f64,
    node_positions: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    shear_diagram: Option<&'a Diagram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moment_diagram: Option<&'a Diagram>,
}

impl<'a> Output<'a> {
    fn new(beam: &'a Beam, results: &'a AnalysisResults, diagrams: bool) -> Self {
        Output {
            label: beam.label(),
            span: beam.span(),
            reaction_left: results.reaction_left,
            reaction_right: results.reaction_right,
            max_shear: results.max_shear,
            max_shear_position: results.max_shear_position,
            max_moment: results.max_moment,
            max_moment_position: results.max_moment_position,
            min_moment: results.min_moment,
            min_moment_position: results.min_moment_position,
            node_positions: &results.node_positions,
            shear_diagram: diagrams.then_some(&results.shear_diagram),
            moment_diagram: diagrams.then_some(&results.moment_diagram),
        }
    }
}

#[derive(Parser)]
#[command(name = "beam_cli")]
#[command(about = "Beam statics CLI - reactions, shear and moment from a JSON beam", long_about = None)]
struct Args {
    /// Include the sampled shear and moment diagrams in the JSON output
    #[arg(short, long)]
    diagrams: bool,

    /// Path to the beam JSON file (reads stdin when omitted)
    input: Option<PathBuf>,
}

fn read_input(path: Option<&Path>) -> CalcResult<String> {
    let read = match path {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map(|_| text)
        }
    };
    read.map_err(|e| {
        let source = path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
        CalcError::invalid_input("input", source, e.to_string())
    })
}

fn run(args: &Args) -> CalcResult<()> {
    let text = read_input(args.input.as_deref())?;
    let input = BeamInput::from_json(&text)?;
    let beam = Beam::from_input(&input)?;
    let results = beam.analyze()?;

    let rule = "═".repeat(39);
    println!("{}", rule);
    println!("  BEAM ANALYSIS RESULTS");
    println!("{}", rule);
    println!();
    println!("Input:");
    if !beam.label().is_empty() {
        println!("  Label:    {}", beam.label());
    }
    println!("  Span:     {:.3}", beam.span());
    println!("  Supports: {}", beam.supports().len());
    println!("  Loads:    {}", beam.loads().len());
    println!();
    println!("Reactions (+ up):");
    for solved in beam.solved_supports()? {
        println!(
            "  {} {:<7} x = {:>8.3}  R = {:>10.3} {}",
            solved.support.kind.symbol(),
            solved.support.kind.display_name(),
            solved.position(),
            solved.reaction,
            solved.sense().arrow()
        );
    }
    println!();
    println!("Extremes:");
    println!(
        "  |V|max = {:.3} at x = {:.3}",
        results.max_shear, results.max_shear_position
    );
    println!(
        "  M_max  = {:.3} at x = {:.3}",
        results.max_moment, results.max_moment_position
    );
    println!(
        "  M_min  = {:.3} at x = {:.3}",
        results.min_moment, results.min_moment_position
    );
    println!();

    println!("JSON Output:");
    let json = serde_json::to_string_pretty(&Output::new(&beam, &results, args.diagrams))?;
    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("analysis failed: {}", e.error_code());
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_diagrams_flag_and_path() {
        let args = Args::try_parse_from(["beam_cli", "in.json", "--diagrams"]).unwrap();
        assert!(args.diagrams);
        assert_eq!(args.input, Some(PathBuf::from("in.json")));

        let args = Args::try_parse_from(["beam_cli", "-d"]).unwrap();
        assert!(args.diagrams);
        assert_eq!(args.input, None);
    }

    #[test]
    fn test_mistyped_flag_rejected() {
        assert!(Args::try_parse_from(["beam_cli", "in.json", "--diagram"]).is_err());
        assert!(Args::try_parse_from(["beam_cli", "--diagrams-typo", "in.json"]).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_input(Some(Path::new("no/such/beam.json"))).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("no/such/beam.json"));
    }
}
