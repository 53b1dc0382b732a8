//! Shared result type for rewrite passes.
//!
//! Every text-to-text pass returns a `PassResult` holding the rewritten text
//! plus the bookkeeping the pipeline folds into the unit's `UpgradeReport`.

use crate::report::{SkippedDeclaration, Stage, StageReport, UpgradeReport};

/// Result of a single rewrite pass.
#[derive(Debug)]
pub struct PassResult {
    /// The text handed to the next pass.
    pub text: String,
    /// Number of constructs this pass rewrote.
    pub rewrites: usize,
    /// Declarations this pass recognized but left unchanged.
    pub skipped: Vec<SkippedDeclaration>,
}

impl PassResult {
    /// No match: the input passes through untouched.
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            rewrites: 0,
            skipped: Vec::new(),
        }
    }

    /// Create a result with rewritten text and a rewrite count.
    pub fn rewritten(text: String, rewrites: usize) -> Self {
        Self {
            text,
            rewrites,
            skipped: Vec::new(),
        }
    }

    /// Create a result that also carries skipped declarations.
    pub fn with_skipped(text: String, rewrites: usize, skipped: Vec<SkippedDeclaration>) -> Self {
        Self {
            text,
            rewrites,
            skipped,
        }
    }

    /// Fold this pass's bookkeeping into the unit report.
    ///
    /// Consumes `self` and returns the text for the next pass.
    pub fn merge_into_report(self, stage: Stage, report: &mut UpgradeReport) -> String {
        tracing::debug!(%stage, rewrites = self.rewrites, skipped = self.skipped.len(), "pass complete");
        report.stages.push(StageReport {
            stage,
            rewrites: self.rewrites,
        });
        report.skipped.extend(self.skipped);
        self.text
    }
}
