//! Document Model - Tables, Rows, Cells
//!
//! A filled form is a .docx archive whose `word/document.xml` body carries the
//! form tables. The model exposes cell text for inspection, bounds-checked
//! cell writes, and persistence that rewrites only the cells that changed
//! while copying every other archive entry through untouched.

use log::debug;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_XML: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed document body: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document body is not well-formed")]
    UnbalancedBody,
}

/// Zero-based address of one cell: (table, row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAt {
    pub table: usize,
    pub row: usize,
    pub col: usize,
}

impl CellAt {
    pub const fn new(table: usize, row: usize, col: usize) -> Self {
        Self { table, row, col }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    text: String,
    dirty: bool,
}

impl Cell {
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// One loaded form document. Owned exclusively by a single generation run.
pub struct Document {
    /// Raw bytes of the source archive, kept for entry pass-through on save.
    archive: Vec<u8>,
    /// The `word/document.xml` body as loaded.
    body: Vec<u8>,
    tables: Vec<Table>,
}

impl Document {
    /// Load a .docx file and parse its top-level tables.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let archive = fs::read(path)?;
        let mut zip = ZipArchive::new(Cursor::new(archive.as_slice()))?;
        let mut body = Vec::new();
        zip.by_name(DOCUMENT_XML)?.read_to_end(&mut body)?;
        let tables = parse_tables(&body)?;
        Ok(Self {
            archive,
            body,
            tables,
        })
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The current text of a cell, or `None` for an out-of-range address.
    pub fn cell_text(&self, at: CellAt) -> Option<&str> {
        self.cell(at).map(Cell::text)
    }

    /// Replace a cell's text wholesale.
    ///
    /// Out-of-range addresses are dropped without error: templates may
    /// legitimately omit optional tables, and a shorter form still fills
    /// everything it does have. Returns whether the write landed.
    pub fn set_cell_text(&mut self, at: CellAt, text: impl Into<String>) -> bool {
        let Some(cell) = self.cell_mut(at) else {
            debug!(
                "skipping write to absent cell ({}, {}, {})",
                at.table, at.row, at.col
            );
            return false;
        };
        cell.text = text.into();
        cell.dirty = true;
        true
    }

    /// Persist the document, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let body = self.rewrite_body()?;
        let mut source = ZipArchive::new(Cursor::new(self.archive.as_slice()))?;
        let mut out = ZipWriter::new(BufWriter::new(File::create(path)?));

        for i in 0..source.len() {
            let entry = source.by_index_raw(i)?;
            if entry.name() == DOCUMENT_XML {
                let options =
                    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
                out.start_file(DOCUMENT_XML, options)?;
                out.write_all(&body)?;
            } else {
                out.raw_copy_file(entry)?;
            }
        }

        out.finish()?;
        debug!("document saved: {}", path.display());
        Ok(())
    }

    fn cell(&self, at: CellAt) -> Option<&Cell> {
        self.tables.get(at.table)?.rows.get(at.row)?.cells.get(at.col)
    }

    fn cell_mut(&mut self, at: CellAt) -> Option<&mut Cell> {
        self.tables
            .get_mut(at.table)?
            .rows
            .get_mut(at.row)?
            .cells
            .get_mut(at.col)
    }

    fn dirty_text(&self, table: usize, row: usize, col: usize) -> Option<&str> {
        let cell = self
            .tables
            .get(table)?
            .rows
            .get(row)?
            .cells
            .get(col)?;
        if cell.dirty {
            Some(cell.text.as_str())
        } else {
            None
        }
    }

    /// Re-emit the document body, substituting the content of dirty cells.
    ///
    /// Cell properties (`w:tcPr`) are copied through so column widths and
    /// borders survive; the original runs of a replaced cell are dropped the
    /// same way a plain text assignment drops them in word processors.
    fn rewrite_body(&self) -> Result<Vec<u8>, DocumentError> {
        let mut reader = Reader::from_reader(self.body.as_slice());
        let mut writer = Writer::new(Vec::new());

        // Counters mirror the indexing used by parse_tables.
        let mut table_depth = 0usize;
        let mut tables_seen = 0usize;
        let mut table_no = 0usize;
        let mut rows_seen = 0usize;
        let mut row_no = 0usize;
        let mut cols_seen = 0usize;

        // Replacement state while inside a dirty cell.
        let mut replacing: Option<&str> = None;
        let mut cell_depth = 0usize;
        let mut keep_props = false;

        loop {
            let event = reader.read_event()?;

            if let Some(text) = replacing {
                match event {
                    Event::Start(e) => {
                        if cell_depth == 0 && e.local_name().as_ref() == b"tcPr" {
                            keep_props = true;
                        }
                        cell_depth += 1;
                        if keep_props {
                            writer.write_event(Event::Start(e))?;
                        }
                    }
                    Event::End(e) => {
                        if cell_depth == 0 {
                            // The matching </w:tc>: emit the replacement run.
                            write_cell_run(&mut writer, text)?;
                            writer.write_event(Event::End(e))?;
                            replacing = None;
                            keep_props = false;
                        } else {
                            cell_depth -= 1;
                            let props_closed =
                                cell_depth == 0 && e.local_name().as_ref() == b"tcPr";
                            if keep_props {
                                writer.write_event(Event::End(e))?;
                            }
                            if props_closed {
                                keep_props = false;
                            }
                        }
                    }
                    Event::Eof => return Err(DocumentError::UnbalancedBody),
                    other => {
                        if keep_props {
                            writer.write_event(other)?;
                        }
                    }
                }
                continue;
            }

            let mut start_replace = None;
            match &event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tbl" => {
                        table_depth += 1;
                        if table_depth == 1 {
                            table_no = tables_seen;
                            tables_seen += 1;
                            rows_seen = 0;
                        }
                    }
                    b"tr" if table_depth == 1 => {
                        row_no = rows_seen;
                        rows_seen += 1;
                        cols_seen = 0;
                    }
                    b"tc" if table_depth == 1 => {
                        let col_no = cols_seen;
                        cols_seen += 1;
                        start_replace = self.dirty_text(table_no, row_no, col_no);
                    }
                    _ => {}
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"tbl" && table_depth > 0 {
                        table_depth -= 1;
                    }
                }
                Event::Eof => break,
                _ => {}
            }

            writer.write_event(event)?;

            if let Some(text) = start_replace {
                replacing = Some(text);
                cell_depth = 0;
                keep_props = false;
            }
        }

        Ok(writer.into_inner())
    }
}

/// Emit `<w:p><w:r><w:t xml:space="preserve">text</w:t></w:r></w:p>`.
fn write_cell_run(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), DocumentError> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(t))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

/// Collect the top-level tables of the body into the plain-text model.
/// Tables nested inside cells belong to word processors, not to forms; their
/// content is not attributed to the outer cell.
fn parse_tables(body: &[u8]) -> Result<Vec<Table>, DocumentError> {
    let mut reader = Reader::from_reader(body);
    let mut tables = Vec::new();

    let mut table_depth = 0usize;
    let mut in_cell = false;
    let mut in_text = false;
    let mut cell_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        tables.push(Table::default());
                    }
                }
                b"tr" if table_depth == 1 => {
                    if let Some(table) = tables.last_mut() {
                        table.rows.push(Row::default());
                    }
                }
                b"tc" if table_depth == 1 => {
                    in_cell = true;
                    cell_text.clear();
                }
                b"t" if in_cell && table_depth == 1 => {
                    in_text = true;
                }
                _ => {}
            },
            Event::Text(e) if in_text => {
                let raw = std::str::from_utf8(e.as_ref())
                    .map_err(|_| DocumentError::UnbalancedBody)?;
                let text = quick_xml::escape::unescape(raw)
                    .map_err(|_| DocumentError::UnbalancedBody)?;
                cell_text.push_str(&text);
            }
            // Entity and character references arrive as their own events,
            // not as part of the surrounding text chunks.
            Event::GeneralRef(e) if in_text => {
                if let Some(ch) = e.resolve_char_ref()? {
                    cell_text.push(ch);
                } else {
                    let name = std::str::from_utf8(e.as_ref())
                        .map_err(|_| DocumentError::UnbalancedBody)?;
                    if let Some(resolved) = quick_xml::escape::resolve_predefined_entity(name) {
                        cell_text.push_str(resolved);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" => {
                    if table_depth > 0 {
                        table_depth -= 1;
                    }
                }
                b"tc" if table_depth == 1 && in_cell => {
                    let row = tables
                        .last_mut()
                        .and_then(|t| t.rows.last_mut())
                        .ok_or(DocumentError::UnbalancedBody)?;
                    row.cells.push(Cell {
                        text: std::mem::take(&mut cell_text),
                        dirty: false,
                    });
                    in_cell = false;
                }
                b"t" => {
                    in_text = false;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if table_depth != 0 {
        return Err(DocumentError::UnbalancedBody);
    }

    Ok(tables)
}
