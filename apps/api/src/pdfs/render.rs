//! PDF page rendering via poppler's `pdftoppm`.

use std::path::Path;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

const PAGE_PREFIX: &str = "page";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF document is empty")]
    EmptyDocument,

    #[error("pdftoppm binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("pdftoppm failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("pdftoppm produced no pages")]
    NoPages,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a PDF into one JPEG per page, in page order.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render_jpeg_pages(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, RenderError>;
}

#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    binary: String,
    dpi: u32,
}

impl PdftoppmRenderer {
    pub fn new(binary: impl Into<String>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }
}

#[async_trait]
impl PageRenderer for PdftoppmRenderer {
    async fn render_jpeg_pages(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, RenderError> {
        if pdf.is_empty() {
            return Err(RenderError::EmptyDocument);
        }

        // Removed on drop, together with the rendered pages.
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("input.pdf");
        tokio::fs::write(&input, pdf).await?;

        let output = tokio::process::Command::new(&self.binary)
            .args(["-jpeg", "-r", &self.dpi.to_string()])
            .arg(&input)
            .arg(dir.path().join(PAGE_PREFIX))
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RenderError::NotFound(e),
                _ => RenderError::Io(e),
            })?;

        if !output.status.success() {
            return Err(RenderError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let pages = read_pages(dir.path()).await?;
        if pages.is_empty() {
            return Err(RenderError::NoPages);
        }
        debug!("Rendered {} pages at {} dpi", pages.len(), self.dpi);
        Ok(pages)
    }
}

/// Reads `page-N.jpg` files from `dir`, ordered by N.
async fn read_pages(dir: &Path) -> Result<Vec<Vec<u8>>, RenderError> {
    let mut numbered = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if let Some(n) = page_number(&name.to_string_lossy()) {
            numbered.push((n, entry.path()));
        }
    }
    numbered.sort_by_key(|(n, _)| *n);

    let mut pages = Vec::with_capacity(numbered.len());
    for (_, path) in numbered {
        pages.push(tokio::fs::read(path).await?);
    }
    Ok(pages)
}

/// Page number of a `pdftoppm` output file. The number is zero-padded
/// to the width of the page count, so `page-7.jpg` and `page-07.jpg` both occur.
fn page_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .strip_suffix(".jpg")?
        .parse()
        .ok()
}

/// Base64 encodes each page for storage and for the vision API.
pub fn encode_pages(pages: &[Vec<u8>]) -> Vec<String> {
    pages.iter().map(|page| STANDARD.encode(page)).collect()
}
