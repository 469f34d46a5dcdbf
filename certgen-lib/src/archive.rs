use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::RenderedDocument;
use crate::utils::sanitize_file_name;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to assemble the certificate archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Package rendered certificates into a single downloadable ZIP.
///
/// Entry names are the documents' base names, sanitized so a creative
/// student name cannot smuggle a path separator into the archive. An empty
/// batch produces a valid, empty archive.
pub fn assemble(documents: &[RenderedDocument]) -> Result<Vec<u8>, ArchiveError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for document in documents {
        zip.start_file(sanitize_file_name(&document.base_name), opts)?;
        zip.write_all(&document.bytes)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
