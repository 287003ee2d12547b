//! Attachment intake
//!
//! Turns a path typed by the user into a [`FileRef`], enforcing the size
//! limit and extension allow-list for the slot it is going into. Rejections
//! never reach the form store.

use crate::config::WizardConfig;
use crate::state::FileRef;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Where an uploaded file goes in the filing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    Drawings,
    Specification,
    AdditionalDocument,
}

impl AttachmentSlot {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Drawings => "Drawings or Figures",
            Self::Specification => "Specification Document",
            Self::AdditionalDocument => "Additional Documents",
        }
    }
}

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a file.", path.display())]
    NotAFile { path: PathBuf },
    #[error("File is too large. Maximum size is {max_mb}MB.")]
    TooLarge { max_mb: u64 },
    #[error("File type not allowed. Accepted types: {accept}")]
    DisallowedType { accept: String },
}

/// Size limit and allowed extensions for one attachment slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Lowercase extensions including the dot, e.g. ".pdf"
    pub accept: Vec<String>,
    pub max_size_mb: u64,
}

impl UploadPolicy {
    pub fn new(accept: &str, max_size_mb: u64) -> Self {
        Self {
            accept: accept
                .split(',')
                .map(|ext| ext.trim().to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
            max_size_mb,
        }
    }

    /// Human readable allow-list, e.g. ".pdf, .doc"
    pub fn accept_label(&self) -> String {
        self.accept.join(", ")
    }

    pub fn allows(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext.to_ascii_lowercase());
        self.accept.iter().any(|allowed| *allowed == dotted)
    }

    /// Check a file on disk against this policy
    pub fn admit(&self, path: &Path) -> Result<FileRef, AttachmentError> {
        let metadata = fs::metadata(path).map_err(|source| AttachmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        if metadata.len() > self.max_size_mb * BYTES_PER_MB {
            return Err(AttachmentError::TooLarge {
                max_mb: self.max_size_mb,
            });
        }
        if !self.allows(path) {
            return Err(AttachmentError::DisallowedType {
                accept: self.accept_label(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(FileRef {
            name,
            size: metadata.len(),
            path: path.to_path_buf(),
        })
    }
}

/// Upload policies for every slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicies {
    pub drawings: UploadPolicy,
    pub specification: UploadPolicy,
    pub documents: UploadPolicy,
}

impl AttachmentPolicies {
    pub fn from_config(config: &WizardConfig) -> Self {
        Self {
            drawings: UploadPolicy::new(".jpg,.jpeg,.png,.pdf", config.drawings_max_mb()),
            specification: UploadPolicy::new(".doc,.docx,.pdf", config.specification_max_mb()),
            documents: UploadPolicy::new(".pdf,.doc,.docx,.jpg,.png", config.documents_max_mb()),
        }
    }

    pub fn for_slot(&self, slot: AttachmentSlot) -> &UploadPolicy {
        match slot {
            AttachmentSlot::Drawings => &self.drawings,
            AttachmentSlot::Specification => &self.specification,
            AttachmentSlot::AdditionalDocument => &self.documents,
        }
    }
}

impl Default for AttachmentPolicies {
    fn default() -> Self {
        Self::from_config(&WizardConfig::default())
    }
}
