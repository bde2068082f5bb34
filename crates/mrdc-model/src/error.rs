use thiserror::Error;

/// Fatal problems that abort a dataset run.
///
/// This is the only error that crosses the normalizer boundary.
/// Cell- and row-level problems are absorbed into the output table's
/// shape and never surface as errors.
#[derive(Debug, Error)]
pub enum StructuralError {
    /// A column the dataset contract requires is entirely absent from
    /// the source schema.
    #[error("dataset '{kind}': required column '{column}' missing from source schema")]
    MissingColumn { kind: String, column: String },

    /// The source produced no usable header row.
    #[error("source '{source_name}' has no columns")]
    EmptySchema { source_name: String },

    #[error("unknown dataset kind '{kind}'")]
    UnknownDatasetKind { kind: String },
}

/// Why a row was dropped during normalization.
///
/// Attached to drop counts in the normalize report and to debug-level
/// log events; individual drops are not otherwise reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectionReason {
    /// A required column was absent or blank.
    MissingRequired,
    /// A required or critical column's coercer failed.
    CoercionFailed,
    /// A critical date column failed to parse.
    InvalidDate,
    /// Exact duplicate of an earlier row.
    Duplicate,
}

impl RejectionReason {
    pub const ALL: [RejectionReason; 4] = [
        RejectionReason::MissingRequired,
        RejectionReason::CoercionFailed,
        RejectionReason::InvalidDate,
        RejectionReason::Duplicate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RejectionReason::MissingRequired => "missing required",
            RejectionReason::CoercionFailed => "coercion failed",
            RejectionReason::InvalidDate => "invalid date",
            RejectionReason::Duplicate => "duplicate",
        }
    }
}
