/// Errors that can occur during segmentation.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    /// Error related to image shapes or sizes.
    #[error(transparent)]
    Image(#[from] combseg_image::ImageError),

    /// The structuring element side must be a positive odd integer.
    #[error("kernel size must be a positive odd integer, got {0}")]
    InvalidKernelSize(usize),

    /// The morphology iteration count must be greater than zero.
    #[error("iteration count must be > 0, got {0}")]
    InvalidIterations(usize),
}
