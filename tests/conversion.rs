//! Conversion bridge behavior with substituted engines.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use inspection_docgen::{
    ConvertError, Converter, ExitInfo, Generator, GeneratorError, InspectionRecord, RenderEngine,
};
use tempfile::TempDir;

/// No engine binary resolvable on the host.
struct MissingEngine;

impl RenderEngine for MissingEngine {
    fn discover(&self) -> Result<PathBuf, ConvertError> {
        Err(ConvertError::EngineNotFound)
    }

    fn invoke(&self, _: &Path, _: &Path, _: &Path) -> Result<ExitInfo, ConvertError> {
        unreachable!("invoke must not run when discovery fails")
    }
}

/// Engine that behaves like LibreOffice: writes `<source stem>.pdf` into the
/// output directory regardless of the requested target name.
struct StubEngine;

impl RenderEngine for StubEngine {
    fn discover(&self) -> Result<PathBuf, ConvertError> {
        Ok(PathBuf::from("/opt/fake/soffice"))
    }

    fn invoke(&self, _: &Path, input: &Path, outdir: &Path) -> Result<ExitInfo, ConvertError> {
        let stem = input.file_stem().unwrap();
        fs::write(outdir.join(Path::new(stem).with_extension("pdf")), b"%PDF-1.4")?;
        Ok(ExitInfo {
            success: true,
            diagnostic: String::new(),
        })
    }
}

/// Engine that exits non-zero with a diagnostic.
struct FailingEngine;

impl RenderEngine for FailingEngine {
    fn discover(&self) -> Result<PathBuf, ConvertError> {
        Ok(PathBuf::from("/opt/fake/soffice"))
    }

    fn invoke(&self, _: &Path, _: &Path, _: &Path) -> Result<ExitInfo, ConvertError> {
        Ok(ExitInfo {
            success: false,
            diagnostic: "Error: source file could not be loaded".to_string(),
        })
    }
}

/// Engine that reports success without producing anything.
struct SilentEngine;

impl RenderEngine for SilentEngine {
    fn discover(&self) -> Result<PathBuf, ConvertError> {
        Ok(PathBuf::from("/opt/fake/soffice"))
    }

    fn invoke(&self, _: &Path, _: &Path, _: &Path) -> Result<ExitInfo, ConvertError> {
        Ok(ExitInfo {
            success: true,
            diagnostic: String::new(),
        })
    }
}

#[test]
fn missing_engine_fails_but_leaves_the_word_document() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("template.docx");
    common::write_inspection_template(&template);

    let generator =
        Generator::with_converter(&template, Converter::with_engine(MissingEngine)).unwrap();
    let base = dir.path().join("report");
    let result = generator.generate_document_and_pdf(&InspectionRecord::new(), &base);

    assert!(matches!(
        result,
        Err(GeneratorError::Convert(ConvertError::EngineNotFound))
    ));
    assert!(base.with_extension("docx").exists());
    assert!(!base.with_extension("pdf").exists());
}

#[test]
fn mismatched_output_name_is_reconciled_by_rename() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("inspection-1234.docx");
    fs::write(&source, b"docx bytes").unwrap();

    let target = dir.path().join("final-report.pdf");
    Converter::with_engine(StubEngine)
        .convert_to_pdf(&source, &target)
        .unwrap();

    assert!(target.exists());
    // The engine-named intermediate must be gone after reconciliation.
    assert!(!dir.path().join("inspection-1234.pdf").exists());
}

#[test]
fn matching_output_name_needs_no_rename() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("report.docx");
    fs::write(&source, b"docx bytes").unwrap();

    let target = dir.path().join("report.pdf");
    Converter::with_engine(StubEngine)
        .convert_to_pdf(&source, &target)
        .unwrap();
    assert!(target.exists());
}

#[test]
fn nonzero_exit_carries_the_engine_diagnostic() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("report.docx");
    fs::write(&source, b"docx bytes").unwrap();

    let result = Converter::with_engine(FailingEngine)
        .convert_to_pdf(&source, &dir.path().join("report.pdf"));

    match result {
        Err(ConvertError::ConversionFailed(diagnostic)) => {
            assert!(diagnostic.contains("could not be loaded"));
        }
        other => panic!("expected ConversionFailed, got {:?}", other.err()),
    }
}

#[test]
fn success_without_an_artifact_is_a_conversion_failure() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("report.docx");
    fs::write(&source, b"docx bytes").unwrap();

    let result = Converter::with_engine(SilentEngine)
        .convert_to_pdf(&source, &dir.path().join("report.pdf"));
    assert!(matches!(result, Err(ConvertError::ConversionFailed(_))));
}

#[test]
fn absent_source_is_rejected_before_discovery() {
    let dir = TempDir::new().unwrap();
    let result = Converter::with_engine(MissingEngine).convert_to_pdf(
        &dir.path().join("nope.docx"),
        &dir.path().join("nope.pdf"),
    );
    assert!(matches!(result, Err(ConvertError::SourceNotFound(_))));
}

#[test]
fn fill_and_convert_produces_sibling_artifacts() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("template.docx");
    common::write_inspection_template(&template);

    let generator =
        Generator::with_converter(&template, Converter::with_engine(StubEngine)).unwrap();
    let base = dir.path().join("nested/output/report");
    let (word_path, pdf_path) = generator
        .generate_document_and_pdf(&InspectionRecord::new(), &base)
        .unwrap();

    assert_eq!(word_path, base.with_extension("docx"));
    assert_eq!(pdf_path, base.with_extension("pdf"));
    assert!(word_path.exists());
    assert!(pdf_path.exists());
}
