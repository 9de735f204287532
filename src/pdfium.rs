//! Binding to the pdfium shared library.
//!
//! Resolution order:
//!
//! 1. `PDFIUM_LIB_PATH`: either the library file itself or the directory
//!    containing it (the platform file name is appended).
//! 2. The system library search path.

use crate::error::PdfAtxError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at a pdfium library file or directory.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to pdfium, honouring [`PDFIUM_LIB_PATH_ENV`].
pub fn bind_pdfium() -> Result<Pdfium, PdfAtxError> {
    let bindings = match std::env::var(PDFIUM_LIB_PATH_ENV) {
        Ok(p) if !p.is_empty() => {
            let lib = library_file(Path::new(&p));
            debug!("Binding pdfium from {}", lib.display());
            Pdfium::bind_to_library(&lib).map_err(|e| {
                PdfAtxError::PdfiumBindingFailed(format!("'{}': {}", lib.display(), e))
            })?
        }
        _ => {
            debug!("Binding pdfium from the system library path");
            Pdfium::bind_to_system_library()
                .map_err(|e| PdfAtxError::PdfiumBindingFailed(e.to_string()))?
        }
    };
    Ok(Pdfium::new(bindings))
}

/// Resolve a `PDFIUM_LIB_PATH` value to the library file.
fn library_file(path: &Path) -> PathBuf {
    if path.is_dir() {
        Pdfium::pdfium_platform_library_name_at_path(path)
    } else {
        path.to_path_buf()
    }
}
