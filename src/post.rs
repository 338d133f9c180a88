//! Generated post and its plain-text download

use std::path::{Path, PathBuf};
use log::{debug, error};
use serde::{Deserialize, Serialize};

/// File name offered for the download
pub const DOWNLOAD_FILE_NAME: &str = "linkedin_post.txt";

/// Mime type offered for the download
pub const DOWNLOAD_MIME: &str = "text/plain";

/// Number of whitespace-delimited tokens
pub fn word_count(text: &str) -> usize
{   text.split_whitespace().count()
}

/// Text returned by the provider, editable afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost
{   pub text: String
  , pub word_count: usize
}

/// Bytes ready to hand to a download surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDownload
{   pub file_name: &'static str
  , pub mime: &'static str
  , pub bytes: Vec<u8>
}

impl GeneratedPost
{   pub fn new(text: String) -> Self
    {   let word_count = word_count(&text);
        GeneratedPost
        {   text
          , word_count
        }
    }

    /// Replace the text with a user edit
    pub fn edit(&mut self, text: impl Into<String>)
    {   self.text = text.into();
        self.word_count = word_count(&self.text);
    }

    pub fn download(&self) -> PostDownload
    {   PostDownload
        {   file_name: DOWNLOAD_FILE_NAME
          , mime: DOWNLOAD_MIME
          , bytes: self.text.as_bytes().to_vec()
        }
    }

    /// Write the download into `dir`, returning the file path
    pub async fn save_to(
      &self
    , dir: impl AsRef<Path>
    ) -> Result<PathBuf, crate::error::Error>
    {   let path = dir.as_ref().join(DOWNLOAD_FILE_NAME);
        debug!("Saving post to {}", path.display());
        tokio::fs::write(&path, self.text.as_bytes())
          .await
          .map_err(|e| {
            error!("Failed to save post: {}", e);
            crate::error::Error::from(e)
          })?;
        Ok(path)
    }
}
