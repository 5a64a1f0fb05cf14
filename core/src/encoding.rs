/// UTF-8 reading and writing with BOM preservation
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid UTF-8 (invalid byte at offset {offset})")]
    InvalidUtf8 { path: String, offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf8Bom,
}

/// Decoded document plus what is needed to write it back byte-compatible.
#[derive(Debug, Clone)]
pub struct TextFile {
    pub text: String,
    pub encoding: Encoding,
    raw: Vec<u8>,
}

impl TextFile {
    /// Decode raw bytes. `path` is only used for error messages.
    pub fn decode(path: &Path, bytes: Vec<u8>) -> Result<Self, EncodingError> {
        let (encoding, body) = if bytes.starts_with(&UTF8_BOM) {
            (Encoding::Utf8Bom, &bytes[UTF8_BOM.len()..])
        } else {
            (Encoding::Utf8, &bytes[..])
        };

        let text = std::str::from_utf8(body)
            .map_err(|e| EncodingError::InvalidUtf8 {
                path: path.display().to_string(),
                offset: e.valid_up_to() + (bytes.len() - body.len()),
            })?
            .to_string();

        Ok(Self {
            text,
            encoding,
            raw: bytes,
        })
    }

    pub fn read(path: &Path) -> Result<Self, EncodingError> {
        let bytes = fs::read(path).map_err(|source| EncodingError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::decode(path, bytes)
    }

    /// Bytes exactly as they were read.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Encode `text` the same way this file was encoded.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self.encoding {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf8Bom => {
                let mut bytes = UTF8_BOM.to_vec();
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
        }
    }
}
