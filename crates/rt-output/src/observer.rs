//! `RouteOutputRenderer<W>`: bridges `RouteRenderer` to a `RouteWriter`.

use log::info;

use rt_route::{BatchSummary, PlannedRoute, RouteOutcome, RouteRenderer};

use crate::writer::RouteWriter;
use crate::{OutputError, OutputResult};

/// A [`RouteRenderer`] that writes every route (and every skipped request)
/// to any [`RouteWriter`] backend.
///
/// Errors from the writer are stored internally because `RouteRenderer`
/// methods have no return value.  After `run_batch` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct RouteOutputRenderer<W: RouteWriter> {
    writer:     W,
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: RouteWriter> RouteOutputRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written:    0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the batch.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of routes successfully handed to the writer.
    pub fn routes_written(&self) -> usize {
        self.written
    }

    /// Unwrap the inner writer (e.g. to inspect files after the batch).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: RouteWriter> RouteRenderer for RouteOutputRenderer<W> {
    fn on_route(&mut self, route: &PlannedRoute) {
        let result = self.writer.write_route(route);
        if result.is_ok() {
            self.written += 1;
        }
        self.store_err(result);
    }

    fn on_skipped(&mut self, outcome: &RouteOutcome) {
        let reason = outcome.skip_reason().unwrap_or_default();
        let result = self.writer.write_skipped(outcome.label(), &reason);
        self.store_err(result);
    }

    fn on_batch_end(&mut self, summary: &BatchSummary) {
        let result = self.writer.finish();
        self.store_err(result);
        info!("{} of {} routes written", self.written, summary.outcomes.len());
    }
}
