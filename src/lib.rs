//! Inspection Document Generator
//!
//! Fills a fixed-layout Word (.docx) inspection form from a flat record of
//! field values, then optionally renders the filled form to PDF through an
//! external LibreOffice process.
//!
//! # Ground Rules
//! 1. The mapping table is data, not code paths
//! 2. Missing template sections degrade silently
//! 3. Unparseable dates pass through as raw text
//! 4. Conversion is attempted exactly once, bounded by a fixed timeout
//! 5. The rendering engine is a black box behind a command-line contract

pub mod convert;
pub mod document;
pub mod format;
pub mod generator;
pub mod mapping;
pub mod record;

pub use convert::{ConvertError, Converter, ExitInfo, LibreOffice, RenderEngine};
pub use document::{CellAt, Document, DocumentError};
pub use format::{CHECKBOX_CHECKED, CHECKBOX_UNCHECKED};
pub use generator::{Generator, GeneratorError};
pub use mapping::{FieldKind, FieldMapping, FIELD_MAPPINGS};
pub use record::{FieldValue, InspectionRecord};
