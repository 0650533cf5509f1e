//! PDF exporter
//!
//! Drives the shared headless browser against the print route for one
//! document: inject the credential, navigate, pass the ordered readiness
//! gates, scrub branding artifacts, force screen media emulation so the
//! output matches the on-screen rendering, and rasterize. The per-call
//! page is closed on every path; the browser itself stays warm.

use crate::pdf::browser::{BrowserLaunchConfig, SharedBrowser};
use crate::pdf::error::{PdfError, PdfResult};
use crate::pdf::gates::{eval_i64, gate, poll_js_minimum, poll_js_truthy};
use crate::pdf::options::PdfExportOptions;
use crate::pdf::route::{Credential, PrintRoute};
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::cdp::js_protocol::runtime::EventExceptionThrown;
use chromiumoxide::Page;
use futures::StreamExt;
use renderer::{DOC_CONTENT_CLASS, DOC_ROOT_ID, FONTS_READY_ATTR};

/// Every valid output starts with these bytes
const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Reads the navigation's HTTP status; 0 when the browser predates the
/// responseStatus timing entry
const JS_RESPONSE_STATUS: &str = "(function(){var e=performance.getEntriesByType('navigation')[0];return e&&e.responseStatus?e.responseStatus:0})()";

const JS_FONTS_LOADED: &str = "document.fonts.status==='loaded'";

/// Exporter over a shared browser and a configured print route
pub struct PdfExporter {
    browser: SharedBrowser,
    route: PrintRoute,
}

impl PdfExporter {
    pub fn new(launch: BrowserLaunchConfig, route: PrintRoute) -> Self {
        Self {
            browser: SharedBrowser::new(launch),
            route,
        }
    }

    /// Availability probe used by the orchestrator before selecting this
    /// exporter
    pub async fn probe(&self) -> bool {
        self.browser.probe().await
    }

    /// Explicit shutdown hook for the shared browser
    pub async fn shutdown(&mut self) {
        self.browser.shutdown().await;
    }

    /// Export one document's print view as PDF bytes
    pub async fn export_pdf(
        &self,
        document_id: &str,
        credential: &Credential,
        options: &PdfExportOptions,
    ) -> PdfResult<Vec<u8>> {
        let session = self.browser.get().await?;
        let page = session.new_page().await?;

        // Mirror page exceptions into the log; hydration failures
        // otherwise die silently inside the browser
        let exception_task = match page.event_listener::<EventExceptionThrown>().await {
            Ok(mut events) => Some(tokio::spawn(async move {
                while let Some(event) = events.next().await {
                    tracing::warn!(
                        description = %event.exception_details.text,
                        "page exception during export"
                    );
                }
            })),
            Err(e) => {
                tracing::debug!(error = %e, "could not subscribe to page exceptions");
                None
            }
        };

        let result = self.drive_export(&page, document_id, credential, options).await;

        // The page closes on every path; only the browser stays warm
        if let Err(e) = page.close().await {
            tracing::warn!(error = %e, "failed to close export page");
        }
        if let Some(task) = exception_task {
            task.abort();
        }
        result
    }

    async fn drive_export(
        &self,
        page: &Page,
        document_id: &str,
        credential: &Credential,
        options: &PdfExportOptions,
    ) -> PdfResult<Vec<u8>> {
        // Prefer the session cookie; fall back to the identity query
        // parameter when injection fails or no cookie was supplied
        let mut cookie_ok = false;
        if let Some(cookie) = &credential.session_cookie {
            let param = CookieParam::builder()
                .name(cookie.name.clone())
                .value(cookie.value.clone())
                .url(self.route.base_url.clone())
                .build()
                .map_err(PdfError::Browser)?;
            match page.set_cookie(param).await {
                Ok(_) => cookie_ok = true,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "cookie injection failed; falling back to identity parameter"
                    );
                }
            }
        }
        let token = if cookie_ok {
            None
        } else {
            credential.identity_token.as_deref()
        };
        let url = self.route.url_for(document_id, token);

        // Gate: navigation completes and the route answers successfully
        tokio::time::timeout(options.navigation_timeout(), page.goto(url.clone()))
            .await
            .map_err(|_| PdfError::GateTimeout {
                gate: gate::NAVIGATION,
                url: url.clone(),
                detail: "navigation did not complete".into(),
            })?
            .map_err(|e| PdfError::Navigation {
                url: url.clone(),
                detail: e.to_string(),
            })?;

        let status = eval_i64(page, JS_RESPONSE_STATUS).await.unwrap_or(0);
        if status >= 400 {
            return Err(PdfError::HttpStatus { url, status });
        }

        // Gate: root container present
        poll_js_truthy(
            page,
            gate::ROOT_CONTAINER,
            &url,
            &format!("!!document.querySelector('#{DOC_ROOT_ID}')"),
            options.gate_timeout(),
            options.poll_interval(),
            "root content container never appeared",
        )
        .await?;

        // Gate: document rendering container present
        poll_js_truthy(
            page,
            gate::CONTENT_CONTAINER,
            &url,
            &format!("!!document.querySelector('.{DOC_CONTENT_CLASS}')"),
            options.gate_timeout(),
            options.poll_interval(),
            "document rendering container never appeared",
        )
        .await?;

        // Gate: enough rendered text to rule out a blank or
        // partially-hydrated page
        poll_js_minimum(
            page,
            gate::CONTENT_LENGTH,
            &url,
            &format!(
                "(function(){{var n=document.querySelector('.{DOC_CONTENT_CLASS}');return n?n.innerText.length:0}})()"
            ),
            options.min_content_len as i64,
            options.content_timeout(),
            options.poll_interval(),
        )
        .await?;

        // Gate: font loading finished
        poll_js_truthy(
            page,
            gate::FONT_LOAD,
            &url,
            JS_FONTS_LOADED,
            options.gate_timeout(),
            options.poll_interval(),
            "font loading never completed",
        )
        .await?;

        // Gate: the document's own fonts-ready marker
        poll_js_truthy(
            page,
            gate::FONTS_READY_MARKER,
            &url,
            &format!(
                "!!document.querySelector('#{DOC_ROOT_ID}[{FONTS_READY_ATTR}=\"true\"]')"
            ),
            options.gate_timeout(),
            options.poll_interval(),
            "fonts-ready marker was never set",
        )
        .await?;

        self.scrub_branding(page).await;

        // Screen media, so the PDF matches the on-screen rendering
        // instead of a separate print stylesheet
        page.execute(SetEmulatedMediaParams {
            media: Some("screen".to_string()),
            features: None,
        })
        .await?;

        let pdf = page.pdf(build_print_params(options)).await?;
        validate_pdf(&pdf)?;
        Ok(pdf)
    }

    /// Remove branding artifacts injected by the hosting runtime
    ///
    /// The heuristics are deliberately narrow and never touch nodes
    /// inside the document content container. Scrub failures are logged,
    /// not fatal; a leftover badge beats a failed export.
    async fn scrub_branding(&self, page: &Page) {
        let js = format!(
            "(function(){{\
             var content=document.querySelector('.{DOC_CONTENT_CLASS}');\
             var nodes=document.querySelectorAll('[id*=\"hosting-badge\"],[class*=\"hosting-badge\"],a[href*=\"utm_source=hosting\"],img[alt^=\"Built with\"]');\
             var removed=0;\
             nodes.forEach(function(el){{if(!content||!content.contains(el)){{el.remove();removed++;}}}});\
             return removed;\
             }})()"
        );
        match eval_i64(page, &js).await {
            Ok(removed) if removed > 0 => {
                tracing::debug!(removed, "scrubbed branding artifacts");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "branding scrub failed"),
        }
    }
}

/// Map export options onto automation print parameters
pub(crate) fn build_print_params(options: &PdfExportOptions) -> PrintToPdfParams {
    let (width, height) = options.format.dimensions_inches();
    let (top, right, bottom, left) = options.margins.to_inches();
    PrintToPdfParams {
        display_header_footer: Some(false),
        print_background: Some(true),
        paper_width: Some(width),
        paper_height: Some(height),
        margin_top: Some(top),
        margin_right: Some(right),
        margin_bottom: Some(bottom),
        margin_left: Some(left),
        prefer_css_page_size: Some(false),
        ..Default::default()
    }
}

/// Validate the produced buffer before it leaves the exporter
pub(crate) fn validate_pdf(bytes: &[u8]) -> PdfResult<()> {
    if bytes.is_empty() {
        return Err(PdfError::InvalidOutput("produced buffer is empty".into()));
    }
    if !bytes.starts_with(PDF_SIGNATURE) {
        return Err(PdfError::InvalidOutput(
            "buffer does not start with the PDF signature".into(),
        ));
    }
    Ok(())
}
