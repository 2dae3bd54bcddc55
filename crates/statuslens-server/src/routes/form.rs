//! Multipart form collection for upload-style endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;

use statuslens_core::{Error, Result};

/// Text fields plus at most one file from a multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<(String, Vec<u8>)>,
}

impl UploadForm {
    /// Drain `multipart`. The first part carrying a filename is the file.
    pub async fn read(multipart: &mut Multipart) -> Result<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::InvalidInput(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) if form.file.is_none() => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| Error::InvalidInput(format!("Failed to read {}: {}", filename, e)))?;
                    form.file = Some((filename, bytes.to_vec()));
                }
                Some(_) => {}
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| Error::InvalidInput(format!("Failed to read field {}: {}", name, e)))?;
                    form.fields.insert(name, value);
                }
            }
        }
        Ok(form)
    }

    /// A required, non-blank text field (trimmed).
    pub fn text(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::InvalidInput(format!("Missing form field: {}", name)))
    }

    /// The uploaded file as `(filename, bytes)`.
    pub fn file(&self) -> Result<(&str, &[u8])> {
        self.file
            .as_ref()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
            .ok_or_else(|| Error::InvalidInput("Missing file upload".to_string()))
    }
}
