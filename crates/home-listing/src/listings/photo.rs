//! Encoding of a selected photo into a `data:` URL stored in the draft.
//!
//! Encoding is a suspend point: reading the file happens on the runtime and
//! can be abandoned through the owning form's teardown token.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio_util::sync::CancellationToken;

/// One file picked in the photo input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    File(PathBuf),
    Bytes {
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl PhotoSource {
    fn file_name(&self) -> Option<&str> {
        match self {
            PhotoSource::File(path) => path.file_name().and_then(|name| name.to_str()),
            PhotoSource::Bytes { file_name, .. } => file_name.as_deref(),
        }
    }

    fn declared_type(&self) -> Option<mime::Mime> {
        match self {
            PhotoSource::File(_) => None,
            PhotoSource::Bytes { content_type, .. } => content_type
                .as_deref()
                .and_then(|raw| raw.parse::<mime::Mime>().ok()),
        }
    }

    /// Media type from the declared content type, then the file extension.
    pub fn media_type(&self) -> mime::Mime {
        self.declared_type()
            .or_else(|| {
                self.file_name()
                    .and_then(|name| mime_guess::from_path(name).first())
            })
            .unwrap_or(mime::APPLICATION_OCTET_STREAM)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("unable to read photo {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("photo upload cancelled before encoding finished")]
    Cancelled,
}

/// Encoded photo ready to merge into the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPhoto {
    pub field: String,
    pub data_url: String,
}

/// Pending encode of the first selected file.
#[derive(Debug)]
pub struct PhotoUpload {
    field: String,
    source: PhotoSource,
    cancel: CancellationToken,
}

impl PhotoUpload {
    /// Keep only the first file of a selection; `None` for an empty one.
    pub fn from_selection(
        field: impl Into<String>,
        selection: Vec<PhotoSource>,
        cancel: CancellationToken,
    ) -> Option<Self> {
        let source = selection.into_iter().next()?;
        Some(Self {
            field: field.into(),
            source,
            cancel,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Encode the photo, resolving as [`PhotoError::Cancelled`] once the
    /// owning form is torn down.
    pub async fn decode(self) -> Result<DecodedPhoto, PhotoError> {
        let PhotoUpload {
            field,
            source,
            cancel,
        } = self;

        if cancel.is_cancelled() {
            return Err(PhotoError::Cancelled);
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(PhotoError::Cancelled),
            encoded = encode(source) => encoded.map(|data_url| DecodedPhoto { field, data_url }),
        }
    }
}

/// Produce `data:<media-type>;base64,<payload>` for a photo source.
pub async fn encode(source: PhotoSource) -> Result<String, PhotoError> {
    let media_type = source.media_type();
    let bytes = match source {
        PhotoSource::File(path) => match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) => return Err(PhotoError::Read { path, source }),
        },
        PhotoSource::Bytes { bytes, .. } => bytes,
    };

    Ok(to_data_url(&media_type, &bytes))
}

pub fn to_data_url(media_type: &mime::Mime, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type.essence_str(),
        STANDARD.encode(bytes)
    )
}
