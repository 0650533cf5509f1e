//! Export orchestrator
//!
//! Selects an exporter implementation per format. Each format has a
//! primary exporter and may have a legacy fallback; the primary runs
//! only when its availability probe passes, a transient failure gets one
//! fallback attempt, and when no path remains the caller receives a
//! clearly tagged unavailable error instead of partial output.

use crate::docx::{export_word_document, WordExportRequest};
use crate::error::{ExportError, Result};
use crate::pdf::{Credential, PdfExportOptions, PdfExporter};
use doc_model::style::DocumentStyle;
use doc_model::{Content, SignatureRecord};
use futures::future::BoxFuture;
use futures::FutureExt;
use renderer::render_standalone;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Output formats the orchestrator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
    Html,
}

impl ExportFormat {
    /// Content type tag accompanying the produced bytes
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Html => "html",
        };
        write!(f, "{name}")
    }
}

/// Everything an exporter might need for one export pass
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Identifier of the document on the print route
    pub document_id: String,
    /// Credential material for the print route
    pub credential: Credential,
    pub content: Content,
    pub style: DocumentStyle,
    pub signatures: Vec<SignatureRecord>,
    pub title: Option<String>,
    pub pdf_options: PdfExportOptions,
}

/// Produced bytes plus their content type
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// A selectable exporter implementation
pub trait DocumentExporter: Send + Sync {
    /// Availability probe; the orchestrator skips implementations whose
    /// probe fails
    fn probe(&self) -> BoxFuture<'_, bool>;

    /// Produce the output bytes for a request
    fn export<'a>(&'a self, request: &'a ExportRequest) -> BoxFuture<'a, Result<Vec<u8>>>;
}

struct Registration {
    primary: Box<dyn DocumentExporter>,
    fallback: Option<Box<dyn DocumentExporter>>,
}

/// Orchestrator over the registered exporters
pub struct ExportService {
    registrations: HashMap<ExportFormat, Registration>,
}

impl ExportService {
    pub fn new() -> Self {
        Self {
            registrations: HashMap::new(),
        }
    }

    /// Standard setup: browser-based PDF, in-process word and markup
    /// builders, no legacy fallbacks
    pub fn with_defaults(pdf: PdfExporter) -> Self {
        let mut service = Self::new();
        service.register(ExportFormat::Pdf, Box::new(PdfRouteExporter::new(pdf)));
        service.register(ExportFormat::Docx, Box::new(WordDocumentExporter));
        service.register(ExportFormat::Html, Box::new(StandaloneMarkupExporter));
        service
    }

    /// Register the primary exporter for a format
    pub fn register(&mut self, format: ExportFormat, primary: Box<dyn DocumentExporter>) {
        self.registrations.insert(
            format,
            Registration {
                primary,
                fallback: None,
            },
        );
    }

    /// Register a primary exporter with a legacy fallback
    pub fn register_with_fallback(
        &mut self,
        format: ExportFormat,
        primary: Box<dyn DocumentExporter>,
        fallback: Box<dyn DocumentExporter>,
    ) {
        self.registrations.insert(
            format,
            Registration {
                primary,
                fallback: Some(fallback),
            },
        );
    }

    /// Export a document in the requested format
    pub async fn export(
        &self,
        format: ExportFormat,
        request: &ExportRequest,
    ) -> Result<ExportOutput> {
        let registration = self
            .registrations
            .get(&format)
            .ok_or(ExportError::Unavailable { format })?;

        let mut primary_error = None;
        if registration.primary.probe().await {
            match registration.primary.export(request).await {
                Ok(bytes) => return Ok(self.output(format, bytes)),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    tracing::warn!(%format, error = %e, "primary exporter failed; trying fallback");
                    primary_error = Some(e);
                }
            }
        } else {
            tracing::warn!(%format, "primary exporter probe failed");
        }

        if let Some(fallback) = &registration.fallback {
            if fallback.probe().await {
                match fallback.export(request).await {
                    Ok(bytes) => return Ok(self.output(format, bytes)),
                    Err(e) => {
                        tracing::warn!(%format, error = %e, "fallback exporter failed");
                        return Err(e);
                    }
                }
            }
            tracing::warn!(%format, "fallback exporter probe failed");
        }

        // Surface the collapsed primary failure when there was one;
        // otherwise no path was available at all
        match primary_error {
            Some(e) => Err(e),
            None => Err(ExportError::Unavailable { format }),
        }
    }

    fn output(&self, format: ExportFormat, bytes: Vec<u8>) -> ExportOutput {
        ExportOutput {
            bytes,
            content_type: format.content_type(),
        }
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Built-in exporters
// =============================================================================

/// Browser-based PDF exporter over the print route
pub struct PdfRouteExporter {
    inner: PdfExporter,
}

impl PdfRouteExporter {
    pub fn new(inner: PdfExporter) -> Self {
        Self { inner }
    }
}

impl DocumentExporter for PdfRouteExporter {
    fn probe(&self) -> BoxFuture<'_, bool> {
        self.inner.probe().boxed()
    }

    fn export<'a>(&'a self, request: &'a ExportRequest) -> BoxFuture<'a, Result<Vec<u8>>> {
        async move {
            let bytes = self
                .inner
                .export_pdf(
                    &request.document_id,
                    &request.credential,
                    &request.pdf_options,
                )
                .await?;
            Ok(bytes)
        }
        .boxed()
    }
}

/// In-process word-processor file builder
pub struct WordDocumentExporter;

impl DocumentExporter for WordDocumentExporter {
    fn probe(&self) -> BoxFuture<'_, bool> {
        // The builder is compiled in; it is always reachable
        futures::future::ready(true).boxed()
    }

    fn export<'a>(&'a self, request: &'a ExportRequest) -> BoxFuture<'a, Result<Vec<u8>>> {
        async move {
            let word_request = WordExportRequest {
                content: request.content.clone(),
                style: request.style,
                signatures: request.signatures.clone(),
                title: request.title.clone(),
            };
            Ok(export_word_document(&word_request)?)
        }
        .boxed()
    }
}

/// Standalone self-contained markup exporter
pub struct StandaloneMarkupExporter;

impl DocumentExporter for StandaloneMarkupExporter {
    fn probe(&self) -> BoxFuture<'_, bool> {
        futures::future::ready(true).boxed()
    }

    fn export<'a>(&'a self, request: &'a ExportRequest) -> BoxFuture<'a, Result<Vec<u8>>> {
        async move {
            let normalized = markup::normalize(&request.content)?;
            let blocks = markup::parse_blocks(&normalized)?;
            let html = render_standalone(
                &blocks,
                &request.style,
                &request.signatures,
                request.title.as_deref(),
            );
            Ok(html.into_bytes())
        }
        .boxed()
    }
}
