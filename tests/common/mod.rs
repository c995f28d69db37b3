//! Shared helpers: synthesize minimal .docx templates for round-trip tests.
#![allow(dead_code)] // not every test binary uses every helper

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

fn document_xml(tables: &[&[usize]]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for rows in tables {
        xml.push_str("<w:tbl><w:tblPr/>");
        for &cols in *rows {
            xml.push_str("<w:tr>");
            for _ in 0..cols {
                xml.push_str(
                    r#"<w:tc><w:tcPr><w:tcW w:w="2000" w:type="dxa"/></w:tcPr><w:p><w:r><w:t></w:t></w:r></w:p></w:tc>"#,
                );
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl><w:p/>");
    }
    xml.push_str("<w:sectPr/></w:body></w:document>");
    xml
}

/// Write a .docx at `path` carrying the given `word/document.xml` body.
pub fn write_docx_raw(path: &Path, document_xml: &str) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(RELS.as_bytes()).unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();

    zip.finish().unwrap();
}

/// Write a .docx at `path` whose body holds one table per entry; each entry
/// lists the cell count of every row.
pub fn write_docx(path: &Path, tables: &[&[usize]]) {
    write_docx_raw(path, &document_xml(tables));
}

/// The full four-table inspection form layout: header details, 13x3
/// checklist grid, spare keys checkbox, signature block.
pub fn write_inspection_template(path: &Path) {
    write_docx(
        path,
        &[
            &[4, 4, 4],
            &[3; 13],
            &[1],
            &[3, 3, 3],
        ],
    );
}
