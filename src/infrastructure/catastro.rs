//! Retrieval of the cadastral open-data archive.
//!
//! The archive is a zip file holding exactly one CSV. It can be downloaded
//! from the open-data portal or read from a local path.

use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use zip::ZipArchive;

/// Default download location of the cadastral dataset.
pub const DEFAULT_CATASTRO_URL: &str = "https://catalogo.sig.cdmx.gob.mx/documents/75/download";

const DOWNLOAD_RETRIES: usize = 2;
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("could not read archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("payload is not a valid zip archive: {0}")]
    NotZip(#[from] zip::result::ZipError),

    #[error("archive contains no files")]
    Empty,

    #[error("archive contains more than one file ({}), the ingestion command needs updating", .0.join(", "))]
    MultipleFiles(Vec<String>),
}

/// The single file extracted from the archive.
#[derive(Debug)]
pub struct ExtractedFile {
    pub name: String,
    pub content: Vec<u8>,
}

/// Downloads the archive, retrying with exponential backoff.
///
/// # Errors
///
/// Returns [`ArchiveError::Download`] once every attempt failed.
pub async fn download(url: &str) -> Result<Vec<u8>, ArchiveError> {
    let client = reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;
    let strategy = ExponentialBackoff::from_millis(500)
        .map(jitter)
        .take(DOWNLOAD_RETRIES);

    let bytes = Retry::spawn(strategy, || async {
        tracing::info!(url, "Downloading cadastral archive");
        let response = client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok::<_, reqwest::Error>(bytes)
    })
    .await
    .inspect_err(|e| tracing::error!(url, error = %e, "Download failed"))?;

    tracing::info!(size = bytes.len(), "Archive downloaded");
    Ok(bytes.to_vec())
}

/// Reads an archive already on disk.
pub async fn read_local(path: &Path) -> Result<Vec<u8>, ArchiveError> {
    Ok(tokio::fs::read(path).await?)
}

/// Lists the names of regular files inside the archive.
pub fn list_files(archive: &[u8]) -> Result<Vec<String>, ArchiveError> {
    let zip = ZipArchive::new(Cursor::new(archive))?;
    Ok(zip
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .map(str::to_string)
        .collect())
}

/// Extracts the only file of the archive.
///
/// # Errors
///
/// Returns [`ArchiveError::Empty`] or [`ArchiveError::MultipleFiles`] unless
/// the archive holds exactly one regular file.
pub fn extract_single(archive: &[u8]) -> Result<ExtractedFile, ArchiveError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;

    let mut files = Vec::new();
    for i in 0..zip.len() {
        let file = zip.by_index(i)?;
        if file.is_file() {
            files.push((i, file.name().to_string()));
        }
    }

    let (index, name) = match files.len() {
        0 => return Err(ArchiveError::Empty),
        1 => files.remove(0),
        _ => {
            return Err(ArchiveError::MultipleFiles(
                files.into_iter().map(|(_, name)| name).collect(),
            ));
        }
    };

    let mut file = zip.by_index(index)?;
    let mut content = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut content)?;

    tracing::info!(name = %name, size = content.len(), "Extracted archive entry");
    Ok(ExtractedFile { name, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn archive(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_single_file() {
        let bytes = archive(&[("catastro.csv", "a,b\n1,2\n")]);

        let file = extract_single(&bytes).unwrap();

        assert_eq!(file.name, "catastro.csv");
        assert_eq!(file.content, b"a,b\n1,2\n");
        assert_eq!(list_files(&bytes).unwrap(), vec!["catastro.csv"]);
    }

    #[test]
    fn test_multiple_files_rejected() {
        let bytes = archive(&[("a.csv", "x"), ("b.csv", "y")]);

        let err = extract_single(&bytes).unwrap_err();

        assert!(matches!(err, ArchiveError::MultipleFiles(ref names) if names.len() == 2));
        assert!(err.to_string().contains("needs updating"));
    }

    #[test]
    fn test_empty_archive_rejected() {
        let bytes = archive(&[]);

        assert!(matches!(extract_single(&bytes), Err(ArchiveError::Empty)));
    }

    #[test]
    fn test_non_zip_payload_rejected() {
        let err = extract_single(b"<html>not found</html>").unwrap_err();

        assert!(matches!(err, ArchiveError::NotZip(_)));
    }
}
