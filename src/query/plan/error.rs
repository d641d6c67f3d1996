use thiserror::Error;

/// Errors raised while turning an AST into a logical plan.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// A `LIKE` pattern could not be compiled.
    #[error("invalid like pattern '{pattern}': {source}")]
    InvalidLikePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
