use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type for embedder-supplied callbacks (text measures, href resolvers).
///
/// Callbacks are expected not to fail; when one does, the render call surfaces
/// the failure as [`Error::Embedder`] instead of producing partial output.
pub type EmbedderError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The diagram description is malformed (unknown tag, wrong field type,
    /// out-of-range default index, linebreaks length mismatch, ...).
    #[error("invalid diagram at `{path}`: {message}")]
    Loading { path: TreePath, message: String },

    /// An embedder-supplied callback failed.
    #[error("embedder callback failed: {message}")]
    Embedder { message: String },
}

impl Error {
    pub fn loading(path: TreePath, message: impl Into<String>) -> Self {
        Self::Loading {
            path,
            message: message.into(),
        }
    }

    pub fn embedder(err: EmbedderError) -> Self {
        Self::Embedder {
            message: err.to_string(),
        }
    }
}

/// Path into a diagram description, reported with loading errors.
///
/// Displays as `$.sequence[2].optional`; the root alone is `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath(Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
