use std::path::PathBuf;

use plotters::prelude::{BitMapBackend, DrawingAreaErrorKind, DrawingBackend};
use thiserror::Error;

pub(crate) type PlottersError = DrawingAreaErrorKind<<BitMapBackend<'static> as DrawingBackend>::ErrorType>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to create chart directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to draw chart '{path}': {source}")]
    Draw {
        path: PathBuf,
        #[source]
        source: PlottersError,
    },
}
