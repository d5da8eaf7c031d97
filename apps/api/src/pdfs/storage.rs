//! Optional S3 archive of uploaded PDFs.

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::info;

use crate::config::S3Config;
use crate::errors::AppError;

#[derive(Clone)]
pub struct PdfArchive {
    client: S3Client,
    bucket: String,
    endpoint: String,
}

impl PdfArchive {
    /// Builds a client for MinIO (local) or any S3-compatible endpoint.
    pub async fn connect(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "cv-copilot-static",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            client: S3Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Uploads a PDF and returns its object URL.
    pub async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Archived PDF to s3://{}/{}", self.bucket, key);
        Ok(object_url(&self.endpoint, &self.bucket, key))
    }

    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 delete failed: {e}")))?;
        Ok(())
    }
}

pub fn object_key(job_id: i32, pdf_id: i32, name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("pdfs/{job_id}/{pdf_id}/{safe}")
}

fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{endpoint}/{bucket}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_sanitizes_name() {
        assert_eq!(
            object_key(3, 14, "CV Jan de Vries (2024).pdf"),
            "pdfs/3/14/CV_Jan_de_Vries__2024_.pdf"
        );
    }

    #[test]
    fn test_object_url_is_path_style() {
        assert_eq!(
            object_url("http://localhost:9000", "cvs", "pdfs/1/2/a.pdf"),
            "http://localhost:9000/cvs/pdfs/1/2/a.pdf"
        );
    }
}
