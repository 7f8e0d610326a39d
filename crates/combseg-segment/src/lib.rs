#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Two independent strategies over an 8-bit grayscale frame, both producing
//! a [`combseg_image::BinaryMask`] of the source dimensions:
//!
//! 1. threshold → morphological cleaning → small-component removal
//!    ([`threshold`], [`morphology`], [`conncomp`]);
//! 2. gradient-tolerant region growing ([`region`]).

/// Error types for the segmentation module.
pub mod error;
pub use error::SegmentError;

/// module containing parallelization utilities.
pub mod parallel;

/// operations to threshold images.
pub mod threshold;

/// morphological cleaning of binary masks.
pub mod morphology;

/// connected component labeling and filtering.
pub mod conncomp;

/// region growing segmentation.
pub mod region;
