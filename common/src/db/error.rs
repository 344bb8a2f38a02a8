use thiserror::Error;

/// Violations of the layout invariants, detected when a layout is built or
/// its module set is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// `module` is the 1-based index as written in the connection file.
    #[error("net {net} references unknown module {module} (layout has {count} modules)")]
    UnknownModule {
        net: usize,
        module: usize,
        count: usize,
    },
    #[error("module set size changed from {expected} to {found}")]
    CardinalityMismatch { expected: usize, found: usize },
    #[error("module {module} has invalid dimensions {width}x{height} (each must lie in 1..=i32::MAX)")]
    InvalidDimensions {
        module: usize,
        width: i64,
        height: i64,
    },
}
