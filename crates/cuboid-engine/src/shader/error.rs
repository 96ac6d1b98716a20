use std::fmt;

/// Pipeline stage a diagnostic belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader compile or link failure.
///
/// `Compile` carries the front-end diagnostic (already rendered with source
/// context). `Link` covers everything that only shows up once both stages and
/// the host-side layout are considered together.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { stage: Stage, diagnostic: String },
    Link { message: String },
}

impl ShaderError {
    pub(crate) fn link(msg: impl Into<String>) -> Self {
        Self::Link { message: msg.into() }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            ShaderError::Compile { stage, .. } => Some(*stage),
            ShaderError::Link { .. } => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, diagnostic } => {
                write!(f, "{stage} shader failed to compile:\n{diagnostic}")
            }
            ShaderError::Link { message } => write!(f, "shader program failed to link: {message}"),
        }
    }
}

impl std::error::Error for ShaderError {}
