//! Error taxonomy shared by every module.

/// Result alias used across the crate.
pub type RicochetResult<T> = Result<T, RicochetError>;

/// Which homogeneous shape collection an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ShapeKind {
    /// Circle collection.
    Circle,
    /// Rectangle collection.
    Rectangle,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Circle => f.write_str("circle"),
            Self::Rectangle => f.write_str("rectangle"),
        }
    }
}

/// Every failure the library reports.
#[derive(thiserror::Error, Debug)]
pub enum RicochetError {
    /// A scene-description line could not be understood.
    #[error("malformed directive at line {line}: {reason}")]
    MalformedDirective {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// More shapes of one kind than the store can hold.
    #[error("capacity exceeded: at most {capacity} {kind} shapes fit in the scene")]
    CapacityExceeded {
        /// The full collection.
        kind: ShapeKind,
        /// Its configured capacity.
        capacity: usize,
    },

    /// Non-positive extent, or a radius the rasterizer cannot take.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A collaborator (font, surface, output) could not be initialized.
    #[error("resource init failure: {0}")]
    ResourceInitFailure(String),

    /// Writing a presented frame failed.
    #[error("output error: {0}")]
    Output(String),

    /// Anything else, with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RicochetError {
    /// [`RicochetError::MalformedDirective`] at `line`.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDirective {
            line,
            reason: reason.into(),
        }
    }

    /// [`RicochetError::InvalidGeometry`].
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// [`RicochetError::ResourceInitFailure`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceInitFailure(msg.into())
    }

    /// [`RicochetError::Output`].
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
