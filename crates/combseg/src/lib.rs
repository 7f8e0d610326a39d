#![deny(missing_docs)]
//! Honeycomb cell-content segmentation for grayscale hive frames.
//!
//! Re-exports the workspace member crates:
//!
//! ```
//! use combseg::image::{GrayImage, ImageSize};
//! use combseg::segment::region::{grow, RegionGrowingConfig};
//!
//! let frame = GrayImage::from_size_val(ImageSize { width: 4, height: 4 }, 200).unwrap();
//! let mask = grow(&frame, &RegionGrowingConfig::default()).unwrap();
//! assert_eq!(mask.size(), frame.size());
//! ```

#[doc(inline)]
pub use combseg_image as image;

#[doc(inline)]
pub use combseg_segment as segment;
