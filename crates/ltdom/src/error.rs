use thiserror::Error;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum DomError {
    /// A vertex was negative, or (for queries and `run`) outside of the range of vertices the
    /// graph currently knows about. Also returned when a query result does not fit in the
    /// vertex type it was requested as.
    #[error("invalid (negative or out of range) vertex index in `{operation}`")]
    InvalidVertex { operation: &'static str },
    #[error("dominators have not been computed, call `run` after the last `add_edge`")]
    NotComputed,
}

impl DomError {
    pub(crate) fn invalid_vertex(operation: &'static str) -> Self {
        DomError::InvalidVertex { operation }
    }
}
