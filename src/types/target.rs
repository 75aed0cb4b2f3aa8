//! Target file metadata and content access

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where the target's bytes come from
#[derive(Debug, Clone)]
pub enum TargetContent {
    InMemory(Vec<u8>),
    OnDisk(PathBuf),
}

/// File selected for simulated sanitization
#[derive(Debug, Clone)]
pub struct TargetFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
    content: TargetContent,
}

/// Metadata snapshot of a target, without its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMetadata {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
}

impl TargetFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            mime_type: guess_mime_type(&name).map(str::to_string),
            size_bytes: bytes.len() as u64,
            content: TargetContent::InMemory(bytes),
            name,
        }
    }

    /// Reads metadata now; content is read when a run starts
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            mime_type: guess_mime_type(&name).map(str::to_string),
            size_bytes: metadata.len(),
            content: TargetContent::OnDisk(path.to_path_buf()),
            name,
        })
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn content(&self) -> &TargetContent {
        &self.content
    }

    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.content {
            TargetContent::InMemory(bytes) => Ok(bytes.clone()),
            TargetContent::OnDisk(path) => tokio::fs::read(path).await,
        }
    }

    pub fn metadata(&self) -> TargetMetadata {
        TargetMetadata {
            name: self.name.clone(),
            size_bytes: self.size_bytes,
            mime_type: self.mime_type.clone(),
        }
    }

    /// MIME type for display, `Binary` when unknown
    pub fn display_type(&self) -> &str {
        match self.mime_type.as_deref() {
            Some(mime) if !mime.is_empty() => mime,
            _ => "Binary",
        }
    }

    /// Size in KiB with two decimals, as shown in the load log line
    pub fn size_kb(&self) -> String {
        format!("{:.2}", self.size_bytes as f64 / 1024.0)
    }
}

/// Infers a MIME type from the file extension
pub fn guess_mime_type(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        _ => return None,
    };
    Some(mime)
}

/// Formats bytes into a human-readable string
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    const SIZES: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let k = 1024f64;
    let i = ((bytes as f64).ln() / k.ln()).floor() as usize;
    let i = i.min(SIZES.len() - 1);
    let value = bytes as f64 / k.powi(i as i32);
    let rendered = format!("{:.*}", decimals, value);
    // Trailing zeros are dropped, "1.50" reads as "1.5".
    let rendered = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        rendered
    };
    format!("{} {}", rendered, SIZES[i])
}

/// Groups digits in thousands, `2048` becomes `2,048`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
