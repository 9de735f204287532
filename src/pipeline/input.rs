//! Input resolution: read a local PDF into memory and name it.
//!
//! pdfium can open a byte slice directly, so the whole file is read up front.
//! The `%PDF` magic bytes are checked before pdfium sees anything, giving a
//! meaningful error instead of a generic parse failure.

use crate::error::PdfAtxError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A local PDF read into memory.
#[derive(Debug)]
pub struct ResolvedInput {
    pub path: PathBuf,
    /// File name component, used to derive the document title.
    pub display_name: String,
    pub bytes: Vec<u8>,
}

/// Read `path`, validating existence, permissions and PDF magic bytes.
pub fn resolve_input(path: impl AsRef<Path>) -> Result<ResolvedInput, PdfAtxError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(PdfAtxError::FileNotFound { path });
    }

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(PdfAtxError::PermissionDenied { path });
        }
        Err(_) => return Err(PdfAtxError::FileNotFound { path }),
    };

    let display_name = display_name_of(&path);
    check_pdf_magic(&bytes, &display_name)?;

    debug!("Resolved local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResolvedInput {
        path,
        display_name,
        bytes,
    })
}

/// File name of `path`, falling back to the full path when it has none.
pub fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Reject byte streams that do not start with `%PDF`.
pub fn check_pdf_magic(bytes: &[u8], name: &str) -> Result<(), PdfAtxError> {
    if bytes.starts_with(b"%PDF") {
        Ok(())
    } else {
        Err(PdfAtxError::NotAPdf {
            name: name.to_string(),
            magic: bytes.iter().take(4).copied().collect(),
        })
    }
}
