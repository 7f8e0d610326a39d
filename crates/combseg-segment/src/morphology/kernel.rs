use crate::error::SegmentError;

/// A morphological structuring element.
///
/// The kernel defines the neighborhood used in morphological operations
/// (dilate, erode, open, close). It stores a binary mask where 1 indicates
/// pixels included in the operation and 0 indicates excluded pixels.
///
/// # Example
///
/// ```rust
/// use combseg_segment::morphology::Kernel;
///
/// let kernel = Kernel::box_kernel(3).unwrap();
/// assert_eq!(kernel.width(), 3);
/// assert_eq!(kernel.height(), 3);
/// assert_eq!(kernel.pad(), (1, 1));
/// ```
pub struct Kernel {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Create a square box structuring element of side `size`.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::InvalidKernelSize`] unless `size` is a
    /// positive odd integer; an even side has no center pixel and would make
    /// the operation asymmetric.
    pub fn box_kernel(size: usize) -> Result<Self, SegmentError> {
        if size == 0 || size % 2 == 0 {
            return Err(SegmentError::InvalidKernelSize(size));
        }

        Ok(Self {
            data: vec![1; size * size],
            width: size,
            height: size,
        })
    }

    /// Get a reference to the kernel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the padding for the kernel (offset from center).
    pub fn pad(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }
}
