//! Gradient-tolerant region growing.
//!
//! A standalone segmentation strategy: regions are grown breadth-first from
//! bright seed pixels, absorbing 4-connected neighbors whose intensity is
//! close to the pixel that reached them. Undersized regions are discarded
//! but their pixels stay claimed, so no pixel is ever considered twice.

use std::collections::VecDeque;

use combseg_image::{BinaryMask, GrayImage};

use crate::error::SegmentError;

/// Configuration for [`grow`].
#[derive(Debug, Clone)]
pub struct RegionGrowingConfig {
    /// Maximum absolute intensity difference between the current frontier
    /// pixel and a neighbor for the neighbor to be absorbed.
    pub gradient_threshold: u8,
    /// A pixel seeds a new region only if its intensity is strictly greater
    /// than this value.
    pub value_threshold: u8,
    /// A grown region is committed to the output mask only if it holds
    /// strictly more than this many pixels; otherwise it is discarded.
    pub min_region_size: usize,
    /// Optional cap on the number of pixels a single region may claim.
    /// `None` (the default) leaves growth unbounded, which is safe: a
    /// region can never exceed the image. When `Some(n)`, neighbors are
    /// absorbed only while the region and its pending queue together hold
    /// fewer than `n` pixels, so a region never claims more than `n`; the
    /// seed pixel itself is always claimed. The cap is enforced whenever it
    /// is set.
    pub max_region_pixels: Option<usize>,
}

impl Default for RegionGrowingConfig {
    fn default() -> Self {
        Self {
            gradient_threshold: 5,
            value_threshold: 100,
            min_region_size: 50,
            max_region_pixels: None,
        }
    }
}

/// Segment a grayscale frame by gradient-tolerant region growing.
///
/// Pixels are scanned in row-major order. Each unvisited pixel brighter than
/// `value_threshold` seeds a region, which is grown breadth-first through an
/// explicit FIFO queue: the front pixel is dequeued and appended to the
/// region, and every in-bounds, unvisited 4-neighbor whose absolute
/// intensity difference from that *frontier* pixel is at most
/// `gradient_threshold` is marked visited and enqueued. Marking at enqueue
/// time guarantees no pixel is queued twice; comparing against the frontier
/// pixel rather than the seed lets intensity drift gradually across a large
/// region.
///
/// When the queue empties, the region is written to the output mask as 255
/// iff it holds strictly more than `min_region_size` pixels. Discarded
/// regions stay visited: their pixels can never seed or join a later
/// region. Pixels at or below `value_threshold` never seed a region but may
/// still be absorbed as neighbors of another growth.
///
/// The whole call is O(rows × cols): every pixel is visited at most once.
///
/// # Examples
///
/// ```
/// use combseg_image::{GrayImage, ImageSize};
/// use combseg_segment::region::{grow, RegionGrowingConfig};
///
/// let size = ImageSize { width: 10, height: 10 };
/// let frame = GrayImage::from_size_val(size, 200).unwrap();
///
/// let config = RegionGrowingConfig {
///     gradient_threshold: 4,
///     value_threshold: 160,
///     min_region_size: 5,
///     max_region_pixels: None,
/// };
///
/// // A uniform frame grows into a single 100-pixel region.
/// let mask = grow(&frame, &config).unwrap();
/// assert!(mask.as_slice().iter().all(|&p| p == 255));
/// ```
pub fn grow(src: &GrayImage, config: &RegionGrowingConfig) -> Result<BinaryMask, SegmentError> {
    let width = src.width();
    let height = src.height();
    let src_data = src.as_slice();

    let mut mask = BinaryMask::from_size_val(src.size(), 0).map_err(SegmentError::Image)?;
    let mask_data = mask.as_slice_mut();

    let mut visited = vec![false; src_data.len()];
    let mut queue = VecDeque::new();
    let mut region = Vec::new();

    let mut committed = 0usize;
    let mut discarded = 0usize;

    for seed in 0..src_data.len() {
        if visited[seed] || src_data[seed] <= config.value_threshold {
            continue;
        }

        region.clear();
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(front) = queue.pop_front() {
            region.push(front);

            let front_val = src_data[front];
            let y = front / width;
            let x = front % width;

            let absorb =
                |neighbor: usize, queue: &mut VecDeque<usize>, visited: &mut Vec<bool>| {
                    if let Some(cap) = config.max_region_pixels {
                        // Pixels claimed by this region, queued ones
                        // included; at the cap the queue only drains.
                        if region.len() + queue.len() >= cap {
                            return;
                        }
                    }
                    if !visited[neighbor]
                        && front_val.abs_diff(src_data[neighbor]) <= config.gradient_threshold
                    {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                };

            if x > 0 {
                absorb(front - 1, &mut queue, &mut visited);
            }
            if x + 1 < width {
                absorb(front + 1, &mut queue, &mut visited);
            }
            if y > 0 {
                absorb(front - width, &mut queue, &mut visited);
            }
            if y + 1 < height {
                absorb(front + width, &mut queue, &mut visited);
            }
        }

        if region.len() > config.min_region_size {
            for &idx in &region {
                mask_data[idx] = 255;
            }
            committed += 1;
        } else {
            discarded += 1;
        }
    }

    log::debug!(
        "region growing: {} regions committed, {} discarded (min size {})",
        committed,
        discarded,
        config.min_region_size
    );

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use combseg_image::ImageSize;

    fn config(gradient: u8, value: u8, min_size: usize) -> RegionGrowingConfig {
        RegionGrowingConfig {
            gradient_threshold: gradient,
            value_threshold: value,
            min_region_size: min_size,
            max_region_pixels: None,
        }
    }

    fn two_blocks_frame() -> GrayImage {
        // Two disjoint 3x3 blocks of value 200 on a zero background.
        let size = ImageSize {
            width: 10,
            height: 10,
        };
        let mut frame = GrayImage::from_size_val(size, 0).unwrap();
        for y in 1..4 {
            for x in 1..4 {
                frame.as_slice_mut()[y * size.width + x] = 200;
            }
        }
        for y in 6..9 {
            for x in 6..9 {
                frame.as_slice_mut()[y * size.width + x] = 200;
            }
        }
        frame
    }

    #[test]
    fn uniform_frame_becomes_one_region() -> Result<(), SegmentError> {
        let size = ImageSize {
            width: 10,
            height: 10,
        };
        let frame = GrayImage::from_size_val(size, 200).map_err(SegmentError::Image)?;

        let mask = grow(&frame, &config(4, 160, 5))?;

        assert_eq!(mask.size(), frame.size());
        assert!(mask.as_slice().iter().all(|&p| p == 255));

        Ok(())
    }

    #[test]
    fn unreachable_value_threshold_yields_empty_mask() -> Result<(), SegmentError> {
        let size = ImageSize {
            width: 8,
            height: 6,
        };
        let frame = GrayImage::from_size_val(size, 254).map_err(SegmentError::Image)?;

        let mask = grow(&frame, &config(4, 255, 5))?;
        assert!(mask.as_slice().iter().all(|&p| p == 0));

        Ok(())
    }

    #[test]
    fn undersized_regions_are_discarded() -> Result<(), SegmentError> {
        let frame = two_blocks_frame();

        // Both blocks grow to area 9, which does not exceed 10.
        let mask = grow(&frame, &config(4, 160, 10))?;
        assert!(mask.as_slice().iter().all(|&p| p == 0));

        Ok(())
    }

    #[test]
    fn large_enough_regions_are_committed() -> Result<(), SegmentError> {
        let frame = two_blocks_frame();
        let width = frame.width();

        // 9 > 8, so both blocks are committed.
        let mask = grow(&frame, &config(4, 160, 8))?;

        for (i, (&src, &out)) in frame
            .as_slice()
            .iter()
            .zip(mask.as_slice().iter())
            .enumerate()
        {
            let expected = if src == 200 { 255 } else { 0 };
            assert_eq!(out, expected, "pixel {} ({}, {})", i, i / width, i % width);
        }

        Ok(())
    }

    #[test]
    fn tolerance_chains_across_a_ramp() -> Result<(), SegmentError> {
        // A strip whose intensity climbs by 4 per column: every adjacent
        // difference passes a gradient threshold of 4, while the total drift
        // far exceeds it. Frontier-relative comparison absorbs the whole
        // strip; a seed-relative rule would stop after two columns.
        let size = ImageSize {
            width: 16,
            height: 2,
        };
        let mut data = Vec::with_capacity(size.width * size.height);
        for _ in 0..size.height {
            for x in 0..size.width {
                data.push(100 + (x as u8) * 4);
            }
        }
        let frame = GrayImage::new(size, data).map_err(SegmentError::Image)?;

        let mask = grow(&frame, &config(4, 99, 5))?;
        assert!(mask.as_slice().iter().all(|&p| p == 255));

        Ok(())
    }

    #[test]
    fn dim_pixels_are_absorbed_but_never_seed() -> Result<(), SegmentError> {
        // The left pixel is below the seed threshold but within gradient
        // reach of its bright neighbor, so it joins that region.
        let size = ImageSize {
            width: 4,
            height: 1,
        };
        let frame =
            GrayImage::new(size, vec![158, 161, 162, 163]).map_err(SegmentError::Image)?;

        let mask = grow(&frame, &config(4, 160, 2))?;
        assert_eq!(mask.as_slice(), &[255, 255, 255, 255]);

        Ok(())
    }

    #[test]
    fn discarded_pixels_stay_claimed() -> Result<(), SegmentError> {
        // A lone bright pixel grows an undersized region; nothing may ever
        // re-seed it, and the rest of the frame is unaffected.
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let mut frame = GrayImage::from_size_val(size, 0).unwrap();
        frame.as_slice_mut()[12] = 200;

        let mask = grow(&frame, &config(4, 160, 1))?;
        assert!(mask.as_slice().iter().all(|&p| p == 0));

        Ok(())
    }

    #[test]
    fn max_region_pixels_caps_growth() -> Result<(), SegmentError> {
        // A uniform 1x15 strip grows left to right. With a cap of 10 the
        // first region claims exactly pixels 0..10; the remainder seeds a
        // second region of 5 pixels, which falls to the minimum size.
        let size = ImageSize {
            width: 15,
            height: 1,
        };
        let frame = GrayImage::from_size_val(size, 200).map_err(SegmentError::Image)?;

        let mut cfg = config(4, 160, 9);
        cfg.max_region_pixels = Some(10);

        let mask = grow(&frame, &cfg)?;
        for (x, &p) in mask.as_slice().iter().enumerate() {
            let expected = if x < 10 { 255 } else { 0 };
            assert_eq!(p, expected, "pixel {}", x);
        }

        let uncapped = grow(&frame, &config(4, 160, 9))?;
        assert!(uncapped.as_slice().iter().all(|&p| p == 255));

        Ok(())
    }

    #[test]
    fn capped_regions_never_exceed_the_cap() -> Result<(), SegmentError> {
        let size = ImageSize {
            width: 10,
            height: 10,
        };
        let frame = GrayImage::from_size_val(size, 200).map_err(SegmentError::Image)?;

        // Committing only regions larger than the cap must leave the mask
        // empty: no single growth may claim more than the cap.
        let mut cfg = config(4, 160, 10);
        cfg.max_region_pixels = Some(10);

        let mask = grow(&frame, &cfg)?;
        assert!(mask.as_slice().iter().all(|&p| p == 0));

        Ok(())
    }

    #[test]
    fn grow_is_pure() -> Result<(), SegmentError> {
        let frame = two_blocks_frame();
        let cfg = config(4, 160, 8);

        let first = grow(&frame, &cfg)?;
        let second = grow(&frame, &cfg)?;
        assert_eq!(first.as_slice(), second.as_slice());

        Ok(())
    }
}
