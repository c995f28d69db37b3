//! Generation Pipelines - Fill and Fill-and-Convert
//!
//! The facade owns nothing but the template path; each run loads its own
//! document model, applies the field mappings, and persists the result.

use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::convert::{ConvertError, Converter, LibreOffice, RenderEngine};
use crate::document::{Document, DocumentError};
use crate::mapping;
use crate::record::InspectionRecord;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Fills inspection form templates and renders them to PDF.
pub struct Generator<E = LibreOffice> {
    template_path: PathBuf,
    converter: Converter<E>,
}

impl Generator<LibreOffice> {
    /// Fails immediately when the template does not exist; everything later
    /// assumes a readable template.
    pub fn new(template_path: impl Into<PathBuf>) -> Result<Self, GeneratorError> {
        Self::with_converter(template_path, Converter::default())
    }
}

impl<E: RenderEngine> Generator<E> {
    pub fn with_converter(
        template_path: impl Into<PathBuf>,
        converter: Converter<E>,
    ) -> Result<Self, GeneratorError> {
        let template_path = template_path.into();
        if !template_path.exists() {
            return Err(GeneratorError::TemplateNotFound(template_path));
        }
        Ok(Self {
            template_path,
            converter,
        })
    }

    /// Fill-only pipeline: record + template -> filled document at `output`.
    /// No external process is involved.
    pub fn generate_document(
        &self,
        record: &InspectionRecord,
        output: &Path,
    ) -> Result<PathBuf, GeneratorError> {
        let mut document = Document::open(&self.template_path)?;

        for (at, text) in mapping::resolve(record) {
            document.set_cell_text(at, text);
        }

        document.save(output)?;
        info!("document generated: {}", output.display());
        Ok(output.to_path_buf())
    }

    /// Fill-and-convert pipeline: sibling `<base>.docx` and `<base>.pdf`.
    ///
    /// The filled document is persisted before conversion starts, so it
    /// survives a conversion failure.
    pub fn generate_document_and_pdf(
        &self,
        record: &InspectionRecord,
        output_base: &Path,
    ) -> Result<(PathBuf, PathBuf), GeneratorError> {
        let document_path = output_base.with_extension("docx");
        self.generate_document(record, &document_path)?;

        let pdf_path = output_base.with_extension("pdf");
        self.converter.convert_to_pdf(&document_path, &pdf_path)?;

        Ok((document_path, pdf_path))
    }
}
