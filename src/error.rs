use std::path::PathBuf;

/// Failures surfaced to the user as error toasts.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not list {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not load icon {}: {source}", .path.display())]
    Icon {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl EditorError {
    /// Path the failed operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::ListDir { path, .. }
            | Self::Icon { path, .. } => path,
        }
    }
}
