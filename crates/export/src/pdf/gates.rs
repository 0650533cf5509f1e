//! Readiness gates
//!
//! The print route is only safe to rasterize after an ordered series of
//! asynchronous conditions has passed. Each gate polls the page under an
//! explicit timeout; a gate that never passes produces a descriptive
//! error naming the gate, the URL, and what was observed.

use crate::pdf::error::{PdfError, PdfResult};
use chromiumoxide::Page;
use std::time::Duration;

/// Gate names used in timeout errors
pub mod gate {
    pub const NAVIGATION: &str = "navigation";
    pub const ROOT_CONTAINER: &str = "root-container";
    pub const CONTENT_CONTAINER: &str = "content-container";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const FONT_LOAD: &str = "font-load";
    pub const FONTS_READY_MARKER: &str = "fonts-ready-marker";
}

/// Evaluate a script expected to produce a boolean
pub async fn eval_bool(page: &Page, js: &str) -> PdfResult<bool> {
    page.evaluate(js)
        .await?
        .into_value::<bool>()
        .map_err(|e| PdfError::Script(e.to_string()))
}

/// Evaluate a script expected to produce an integer
pub async fn eval_i64(page: &Page, js: &str) -> PdfResult<i64> {
    page.evaluate(js)
        .await?
        .into_value::<i64>()
        .map_err(|e| PdfError::Script(e.to_string()))
}

/// Poll a boolean script until it turns true or the timeout elapses
///
/// Evaluation errors during hydration (the execution context is torn
/// down and rebuilt) count as "not ready yet" rather than failures.
pub async fn poll_js_truthy(
    page: &Page,
    gate: &'static str,
    url: &str,
    js: &str,
    timeout: Duration,
    interval: Duration,
    failure_detail: &str,
) -> PdfResult<()> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match eval_bool(page, js).await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => {
                tracing::debug!(gate, error = %e, "gate probe failed; retrying");
            }
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(PdfError::GateTimeout {
                gate,
                url: url.to_string(),
                detail: failure_detail.to_string(),
            });
        }
        tokio::time::sleep(interval).await;
    }
}

/// Poll an integer script until it reaches a minimum value
///
/// The timeout error reports the last observed value, which is the
/// diagnostic that distinguishes a blank page from a slow one.
pub async fn poll_js_minimum(
    page: &Page,
    gate: &'static str,
    url: &str,
    js: &str,
    minimum: i64,
    timeout: Duration,
    interval: Duration,
) -> PdfResult<()> {
    let deadline = tokio::time::Instant::now() + timeout;
    let mut observed: i64 = 0;
    loop {
        match eval_i64(page, js).await {
            Ok(value) => {
                observed = value;
                if value >= minimum {
                    return Ok(());
                }
            }
            Err(e) => {
                tracing::debug!(gate, error = %e, "gate probe failed; retrying");
            }
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(PdfError::GateTimeout {
                gate,
                url: url.to_string(),
                detail: format!("observed value {observed} below minimum {minimum}"),
            });
        }
        tokio::time::sleep(interval).await;
    }
}
