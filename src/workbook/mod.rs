//! Sheet-name extraction from `.xlsx` workbooks.
//!
//! Only `xl/workbook.xml` is read; worksheet contents are never touched.

use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;

/// ZIP local file header: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

const WORKBOOK_PART: &str = "xl/workbook.xml";

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Please select an Excel file (.xlsx or .xls), got {0:?}")]
    NotAnExcelFile(String),

    #[error("Legacy .xls workbooks are not supported, save the file as .xlsx")]
    LegacyXls,

    #[error("File is not an .xlsx archive")]
    NotAZip,

    #[error("ZIP archive error: {0}")]
    Zip(String),

    #[error("Missing component: {0}")]
    MissingComponent(&'static str),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Workbook has no sheets")]
    NoSheets,
}

impl From<zip::result::ZipError> for WorkbookError {
    fn from(err: zip::result::ZipError) -> Self {
        WorkbookError::Zip(err.to_string())
    }
}

impl From<quick_xml::Error> for WorkbookError {
    fn from(err: quick_xml::Error) -> Self {
        WorkbookError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WorkbookError>;

/// Rejects anything that is not an Excel workbook by extension. Legacy `.xls`
/// is recognised but cannot be decoded.
pub fn check_extension(path: &Path) -> Result<()> {
    let ext = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("xlsx") => Ok(()),
        Some("xls")  => Err(WorkbookError::LegacyXls),
        _            => Err(WorkbookError::NotAnExcelFile(path.display().to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    sheet_names: Vec<String>,
}

impl Workbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        check_extension(path)?;
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < ZIP_MAGIC.len() || data[..ZIP_MAGIC.len()] != ZIP_MAGIC {
            return Err(WorkbookError::NotAZip);
        }
        let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
        let mut xml = String::new();
        archive.by_name(WORKBOOK_PART)
            .map_err(|_| WorkbookError::MissingComponent(WORKBOOK_PART))?
            .read_to_string(&mut xml)?;

        let sheet_names = parse_sheet_names(&xml)?;
        if sheet_names.is_empty() {
            return Err(WorkbookError::NoSheets);
        }
        Ok(Self { sheet_names })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] { &self.sheet_names }

    pub fn first_sheet_name(&self) -> &str {
        // Non-empty by construction.
        self.sheet_names.first().map(String::as_str).unwrap_or_default()
    }
}

/// Collects the `name` attribute of every `<sheet>` element, in order.
fn parse_sheet_names(xml: &str) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut names = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        let value = attr.unescape_value()
                            .map_err(|err| WorkbookError::Xml(err.to_string()))?;
                        if !value.is_empty() {
                            names.push(value.into_owned());
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(names)
}
