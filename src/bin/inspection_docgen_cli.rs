//! Inspection Document Generator CLI
//!
//! Fills the inspection form template from a JSON record and writes
//! `<output>.docx`, plus `<output>.pdf` unless --word-only is given.
//! Returns non-zero on any failure.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use inspection_docgen::{Generator, InspectionRecord};

#[derive(Parser)]
#[command(name = "inspection-docgen-cli")]
#[command(about = "Generate inspection form documents and PDFs")]
struct Cli {
    /// Path to the Word template file (.docx)
    #[arg(short, long)]
    template: PathBuf,

    /// Path to the JSON file containing the inspection record
    #[arg(short, long)]
    record: PathBuf,

    /// Output base path (extension is ignored; .docx and .pdf are appended)
    #[arg(short, long)]
    output: PathBuf,

    /// Generate only the Word document, skip PDF conversion
    #[arg(long)]
    word_only: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let raw = match fs::read_to_string(&cli.record) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Failed to read record {}: {}", cli.record.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let record: InspectionRecord = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Malformed record {}: {}", cli.record.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let generator = match Generator::new(&cli.template) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.word_only {
        let output = cli.output.with_extension("docx");
        match generator.generate_document(&record, &output) {
            Ok(path) => {
                println!("Word document: {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        }
    } else {
        match generator.generate_document_and_pdf(&record, &cli.output) {
            Ok((word_path, pdf_path)) => {
                println!("Word document: {}", word_path.display());
                println!("PDF document: {}", pdf_path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        }
    }
}
