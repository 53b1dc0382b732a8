//! Per-unit report of what the pipeline rewrote and what it left alone.
//!
//! The rewritten text alone cannot tell a fully migrated unit from a
//! partially migrated one. The report makes the difference observable:
//! every stage records how many constructs it rewrote, and the field
//! signature stage records each declaration it recognized but skipped.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ClassForm,
    NameDirective,
    NormalizeLines,
    HoistBlockType,
    BindingMethod,
    Interfaces,
    FieldSignatures,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::ClassForm,
        Stage::NameDirective,
        Stage::NormalizeLines,
        Stage::HoistBlockType,
        Stage::BindingMethod,
        Stage::Interfaces,
        Stage::FieldSignatures,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ClassForm => "class_form",
            Stage::NameDirective => "name_directive",
            Stage::NormalizeLines => "normalize_lines",
            Stage::HoistBlockType => "hoist_block_type",
            Stage::BindingMethod => "binding_method",
            Stage::Interfaces => "interfaces",
            Stage::FieldSignatures => "field_signatures",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite count for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub rewrites: usize,
}

/// Why a recognized declaration was left as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Keyword and symbol were found but no `, <type>` followed.
    UnrecognizedShape,
    /// The declaration already carries a `null:` or `required:` flag.
    AlreadyUpgraded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnrecognizedShape => f.write_str("declaration shape not recognized"),
            SkipReason::AlreadyUpgraded => f.write_str("declaration already upgraded"),
        }
    }
}

/// A declaration left unchanged in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDeclaration {
    /// 1-based line in the upgraded text.
    pub line: usize,
    /// The declaration text, from its keyword to the end of the line.
    pub text: String,
    pub reason: SkipReason,
}

/// Aggregated report for one upgraded unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeReport {
    pub stages: Vec<StageReport>,
    pub skipped: Vec<SkippedDeclaration>,
}

impl UpgradeReport {
    /// Total rewrites across all stages.
    pub fn rewritten(&self) -> usize {
        self.stages.iter().map(|s| s.rewrites).sum()
    }

    /// Rewrites performed by a single stage (0 if it did not run).
    pub fn rewrites_for(&self, stage: Stage) -> usize {
        self.stages
            .iter()
            .filter(|s| s.stage == stage)
            .map(|s| s.rewrites)
            .sum()
    }

    /// No declaration was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
