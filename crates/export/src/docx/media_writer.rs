//! Media writer
//!
//! Embeds signature images into the package. Every payload is decoded
//! and validated against a known raster signature first; anything that
//! fails decoding or carries an unrecognized header is skipped with a
//! warning so a corrupt upload can never poison the package.

use super::relationship_types;
use super::writer::DocxWriter;
use super::DocxResult;
use doc_model::{RasterFormat, SignatureRecord};
use std::io::{Seek, Write};

/// Writer for signature image media files
pub struct MediaWriter;

impl MediaWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write all embeddable signature images to the archive
    ///
    /// Returns one entry per signature: the relationship ID of its
    /// embedded image, or `None` when the signature had no image or the
    /// payload was rejected.
    pub fn write_media<W: Write + Seek>(
        &self,
        signatures: &[SignatureRecord],
        writer: &mut DocxWriter<W>,
    ) -> DocxResult<Vec<Option<String>>> {
        let mut rels = Vec::with_capacity(signatures.len());
        let mut index = 1u32;

        for sig in signatures {
            let bytes = match sig.decode_image() {
                Ok(Some(bytes)) => bytes,
                Ok(None) => {
                    rels.push(None);
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        signer = %sig.signer_name,
                        error = %e,
                        "skipping signature image that failed to decode"
                    );
                    rels.push(None);
                    continue;
                }
            };

            let format = RasterFormat::from_bytes(&bytes);
            if !format.is_embeddable() {
                tracing::warn!(
                    signer = %sig.signer_name,
                    "skipping signature image with unrecognized raster header"
                );
                rels.push(None);
                continue;
            }

            let filename = format!("image{index}.{}", format.extension());
            writer.write_binary(&format!("word/media/{filename}"), &bytes)?;
            writer
                .content_types_mut()
                .add_default(format.extension(), format.mime_type());
            let rel_id = writer
                .doc_rels_mut()
                .add(relationship_types::IMAGE, &format!("media/{filename}"));
            rels.push(Some(rel_id));
            index += 1;
        }

        Ok(rels)
    }
}
