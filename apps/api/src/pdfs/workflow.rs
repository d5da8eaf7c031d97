//! PDF → page images → text.

use futures::future::join_all;
use tracing::{error, info};

use crate::errors::AppError;
use crate::llm_client::{LanguageModel, LlmError};
use crate::models::text::TextRow;
use crate::pdfs::render::encode_pages;
use crate::pdfs::{images, repo};
use crate::state::AppState;
use crate::texts::repo as text_repo;

/// Text of a transcribed PDF plus the number of pages it came from.
#[derive(Debug)]
pub struct ConvertedText {
    pub text: TextRow,
    pub page_count: usize,
}

/// Renders the stored PDF, transcribes every page and stores the result as a new text.
pub async fn convert_pdf_to_text(state: &AppState, pdf_id: i32) -> Result<ConvertedText, AppError> {
    let pdf = repo::get_pdf_file(&state.db, pdf_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("PDF {pdf_id} not found")))?;
    let bytes = pdf
        .file
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::UnprocessableEntity(format!("PDF {pdf_id} has no stored file")))?;

    let pages = state.renderer.render_jpeg_pages(&bytes).await.map_err(|e| {
        error!("Rendering PDF {pdf_id} failed: {e}");
        AppError::from(e)
    })?;
    let encoded = encode_pages(&pages);
    info!("Rendered PDF {pdf_id} into {} pages", encoded.len());

    images::replace_images(&state.db, pdf.id, pdf.job_id, &encoded).await?;

    let page_texts = read_pages_in_batches(
        state.llm.as_ref(),
        &encoded,
        state.config.pdf.parallel_tasks,
    )
    .await
    .map_err(|e| {
        error!("Transcribing PDF {pdf_id} failed: {e}");
        AppError::from(e)
    })?;

    let text = text_repo::insert_text(&state.db, pdf_id, &page_texts.join("\n")).await?;
    info!("Stored text {} for PDF {pdf_id}", text.id);

    Ok(ConvertedText {
        text,
        page_count: encoded.len(),
    })
}

/// Transcribes pages with at most `batch_size` vision calls in flight.
/// Batches run one after another; results keep page order. One failure fails the lot.
pub async fn read_pages_in_batches(
    llm: &dyn LanguageModel,
    encoded_pages: &[String],
    batch_size: usize,
) -> Result<Vec<String>, LlmError> {
    let mut texts = Vec::with_capacity(encoded_pages.len());

    for batch in encoded_pages.chunks(batch_size.max(1)) {
        let results = join_all(batch.iter().map(|page| llm.read_image(page))).await;
        for result in results {
            texts.push(result?);
        }
    }

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Echoes the page back and tracks how many calls overlap.
    #[derive(Default)]
    struct EchoVision {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LanguageModel for EchoVision {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            unreachable!("page reading only uses the vision call")
        }

        async fn read_image(&self, encoded_jpeg: &str) -> Result<String, LlmError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            // Later pages finish first, so ordering cannot come from completion order.
            let delay = 20u64.saturating_sub(encoded_jpeg.len() as u64);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if encoded_jpeg == "fail" {
                return Err(LlmError::EmptyContent);
            }
            Ok(format!("text of {encoded_jpeg}"))
        }
    }

    fn pages(n: usize) -> Vec<String> {
        (1..=n).map(|i| "p".repeat(i)).collect()
    }

    #[tokio::test]
    async fn test_batches_preserve_page_order() {
        let llm = EchoVision::default();
        let texts = read_pages_in_batches(&llm, &pages(5), 2).await.unwrap();

        let expected: Vec<String> = pages(5).iter().map(|p| format!("text of {p}")).collect();
        assert_eq!(texts, expected);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_batches_bound_calls_in_flight() {
        let llm = EchoVision::default();
        read_pages_in_batches(&llm, &pages(7), 3).await.unwrap();
        assert!(llm.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_failed_page_fails_the_whole_read() {
        let llm = EchoVision::default();
        let pages = vec!["a".to_string(), "fail".to_string(), "c".to_string()];
        let result = read_pages_in_batches(&llm, &pages, 20).await;
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_no_pages_means_no_calls() {
        let llm = EchoVision::default();
        let texts = read_pages_in_batches(&llm, &[], 4).await.unwrap();
        assert!(texts.is_empty());
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }
}
