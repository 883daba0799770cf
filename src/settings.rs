use crate::common::plots::DEFAULT_FIGURE_SIZE;
use std::path::PathBuf;

/// The smallest image edge the user is allowed to specify, in pixels
pub const MIN_IMAGE_EDGE: u32 = 320;

/// The largest image edge the user is allowed to specify, in pixels
pub const MAX_IMAGE_EDGE: u32 = 8192;

/// Number of simulations stored in each result file unless told otherwise
pub const DEFAULT_SIMULATIONS: usize = 4;

/// Directory charts and summaries are written to unless told otherwise
pub const DEFAULT_OUTPUT_DIR: &str = "report/plots";

/// Controls where and how reports are generated.
///
/// # Remarks
///
/// Values set directly may be out of range; call [`Self::sanitize`] before
/// handing the settings to a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Directory that receives charts and summaries.
    /// Created if missing.
    pub output_dir: PathBuf,

    /// Width and height of each chart, in pixels.
    ///
    /// Range is 320 to 8192 on each edge.
    pub image_size: (u32, u32),

    /// Number of simulations expected in each result file.
    ///
    /// Must be at least 1.
    pub simulations: usize,

    /// Set this to 'true' to write a text and JSON summary next to the charts
    /// of each result file.
    pub write_summaries: bool,
}

impl ReportSettings {
    /// Creates a new `ReportSettings` with default values.
    pub fn new(output_dir: PathBuf) -> Self {
        ReportSettings {
            output_dir,
            image_size: DEFAULT_FIGURE_SIZE,
            simulations: DEFAULT_SIMULATIONS,
            write_summaries: true,
        }
    }

    /// Sanitizes settings to acceptable values if they are out of range.
    pub fn sanitize(&mut self) {
        let (width, height) = self.image_size;
        self.image_size = (
            width.clamp(MIN_IMAGE_EDGE, MAX_IMAGE_EDGE),
            height.clamp(MIN_IMAGE_EDGE, MAX_IMAGE_EDGE),
        );
        self.simulations = self.simulations.max(1);
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}
