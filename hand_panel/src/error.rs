//! Errors.  Every one of them ends the session; the run loop reports it and
//! releases the camera, tracker and window on the way out.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An icon image is missing or unreadable.  Raised before any camera is
    /// opened.
    #[error("failed to load icon {}: {source}", path.display())]
    Asset {
        path:   PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("camera: {0}")]
    Camera(String),

    /// The camera is open but produced no frame.
    #[error("can't receive frame")]
    NoFrame,

    #[error("hand tracker: {0}")]
    Tracker(String),

    #[error("display: {0}")]
    Display(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True for failures raised before the main loop starts.
    pub fn is_startup(&self) -> bool {
        matches!(self, AppError::Asset { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(AppError::NoFrame.to_string(), "can't receive frame");
        assert_eq!(
            AppError::Tracker("helper exited".into()).to_string(),
            "hand tracker: helper exited"
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        assert_eq!(AppError::from(io).to_string(), "pipe closed");
    }

    #[test]
    fn asset_errors_are_startup_errors() {
        let missing = image::open("definitely/not/here.png").unwrap_err();
        let err = AppError::Asset { path: "definitely/not/here.png".into(), source: missing };
        assert!(err.is_startup());
        assert!(err.to_string().starts_with("failed to load icon definitely/not/here.png"));
        assert!(!AppError::NoFrame.is_startup());
    }
}
