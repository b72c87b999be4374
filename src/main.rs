//! CLI for cv2docx - CV to company-template DOCX converter

use clap::Parser;
use cv2docx::llm::CvExtractor;
use cv2docx::pipeline::{package_zip, Converter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Company template DOCX containing {{...}} placeholders
    template: PathBuf,

    /// Candidate CV files (PDF, DOCX or plain text)
    #[arg(required = true)]
    cvs: Vec<PathBuf>,

    /// Directory receiving the converted documents
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Additionally package every converted document into this ZIP archive
    #[arg(long)]
    zip: Option<PathBuf>,

    /// Name of the environment variable holding the Anthropic API key
    #[arg(long, default_value = "ANTHROPIC_API_KEY")]
    api_key_env: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let api_key = match std::env::var(&args.api_key_env) {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Environment variable {} is not set", args.api_key_env);
            std::process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.out_dir) {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    }

    let extractor = CvExtractor::new(api_key);
    let converter = match Converter::new(&args.template, &args.out_dir, extractor) {
        Ok(converter) => converter,
        Err(e) => {
            eprintln!("Error loading template: {}", e);
            std::process::exit(1);
        }
    };

    let report = converter.convert_all(&args.cvs);

    for outcome in &report.converted {
        println!(
            "Converted {} -> {}",
            outcome.candidate_name,
            outcome.output_path.display()
        );
    }
    for (cv, reason) in &report.skipped {
        eprintln!("Skipped {}: {}", cv.display(), reason);
    }

    if let Some(zip_path) = &args.zip {
        if report.converted.is_empty() {
            eprintln!("Nothing to package; skipping {}", zip_path.display());
        } else if let Err(e) = package_zip(&report.converted, zip_path) {
            eprintln!("Error writing ZIP archive: {}", e);
            std::process::exit(1);
        } else {
            cv2docx::audit::log_event(
                &cv2docx::audit::current_actor(),
                "package_zip",
                &format!("{} CVs", report.converted.len()),
            );
            println!("Packaged {} document(s) into {}", report.converted.len(), zip_path.display());
        }
    }

    if report.converted.is_empty() {
        eprintln!("No CVs converted");
        std::process::exit(1);
    }
}
