use crate::errors::AppError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Name of the single archive entry holding the credit record.
pub const ENTRY_NAME: &str = "loan_user_xml.xml";

/// Packs `document` as the only entry of a deflated zip archive and returns
/// the archive bytes as standard base64 (padded, no line breaks).
///
/// The archive is assembled in memory; nothing touches the filesystem.
pub fn pack(document: &[u8]) -> Result<String, AppError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(ENTRY_NAME, options)?;
    zip.write_all(document)?;
    let archive = zip.finish()?.into_inner();

    tracing::debug!(
        "Packed {} document bytes into {} byte archive",
        document.len(),
        archive.len()
    );

    Ok(STANDARD.encode(archive))
}

/// Reverses [`pack`]: decodes the base64 text and returns the sole entry's
/// name and decompressed bytes.
pub fn unpack(encoded: &str) -> Result<(String, Vec<u8>), AppError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::Archive(format!("Invalid base64 payload: {}", e)))?;

    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    if archive.len() != 1 {
        return Err(AppError::Archive(format!(
            "Expected a single entry, found {}",
            archive.len()
        )));
    }

    let mut entry = archive.by_index(0)?;
    let name = entry.name().to_string();
    let mut content = Vec::new();
    entry.read_to_end(&mut content)?;

    Ok((name, content))
}
