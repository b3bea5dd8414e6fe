//! Scan regions and tile generation
//!
//! Regions are expressed in percent of the image (0–100 on both axes) so the
//! same layout can be reused across image sizes. [`tiles_to_regions`] behaves
//! like the engine's own `createRegionsFromTiles`, without needing the engine.

use crate::{Error, Result};

/// A rectangle of the image, in percent of its width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRegion {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl ScanRegion {
    /// The whole image.
    pub const FULL: ScanRegion = ScanRegion {
        left: 0.0,
        top: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Build a caller-defined region.
    ///
    /// The rectangle must have a positive size and lie inside the image.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self> {
        if ![left, top, width, height].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidGeometry("region coordinates must be finite"));
        }
        if left < 0.0 || top < 0.0 {
            return Err(Error::InvalidGeometry("region starts outside the image"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidGeometry("region must have a positive size"));
        }
        if left + width > 100.0 || top + height > 100.0 {
            return Err(Error::InvalidGeometry("region extends past the image"));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Map the region onto an image of `width` x `height` pixels.
    ///
    /// Returns `(x, y, w, h)`; edges are rounded outward and clamped to the image.
    pub fn to_pixels(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let scale = |pct: f32, size: u32| f64::from(pct) * f64::from(size) / 100.0;
        let x0 = scale(self.left, width).floor().clamp(0.0, f64::from(width)) as u32;
        let y0 = scale(self.top, height).floor().clamp(0.0, f64::from(height)) as u32;
        let x1 = scale(self.right(), width).ceil().clamp(0.0, f64::from(width)) as u32;
        let y1 = scale(self.bottom(), height).ceil().clamp(0.0, f64::from(height)) as u32;
        (x0, y0, x1 - x0, y1 - y0)
    }
}

/// Split the image into `tiles_x` columns and `tiles_y` rows, each grown by
/// `overlap_percent` of its own size on every side and clipped to the image.
///
/// Regions come back in row-major order; index `row * tiles_x + col`.
///
/// # Example
/// ```
/// use mwscan::geometry::tiles_to_regions;
///
/// let regions = tiles_to_regions(2, 1, 10).unwrap();
/// assert_eq!(regions.len(), 2);
/// assert_eq!(regions[0].width(), 55.0);
/// assert_eq!(regions[1].left(), 45.0);
/// ```
pub fn tiles_to_regions(
    tiles_x: i32,
    tiles_y: i32,
    overlap_percent: i32,
) -> Result<Vec<ScanRegion>> {
    validate_tiles(tiles_x, tiles_y, overlap_percent)?;

    let tile_w = 100.0 / f64::from(tiles_x);
    let tile_h = 100.0 / f64::from(tiles_y);
    let pad_x = tile_w * f64::from(overlap_percent) / 100.0;
    let pad_y = tile_h * f64::from(overlap_percent) / 100.0;

    let mut regions = Vec::with_capacity((tiles_x * tiles_y) as usize);
    for row in 0..tiles_y {
        let top = (f64::from(row) * tile_h - pad_y).max(0.0);
        let bottom = (f64::from(row + 1) * tile_h + pad_y).min(100.0);
        for col in 0..tiles_x {
            let left = (f64::from(col) * tile_w - pad_x).max(0.0);
            let right = (f64::from(col + 1) * tile_w + pad_x).min(100.0);
            regions.push(ScanRegion {
                left: left as f32,
                top: top as f32,
                width: (right - left) as f32,
                height: (bottom - top) as f32,
            });
        }
    }
    Ok(regions)
}

/// Reject tile parameters before anything is sent to the engine.
pub(crate) fn validate_tiles(tiles_x: i32, tiles_y: i32, overlap_percent: i32) -> Result<()> {
    if tiles_x <= 0 || tiles_y <= 0 {
        return Err(Error::InvalidGeometry("tile counts must be positive"));
    }
    if tiles_x.checked_mul(tiles_y).is_none() {
        return Err(Error::InvalidGeometry("too many tiles"));
    }
    if !(0..100).contains(&overlap_percent) {
        return Err(Error::InvalidGeometry("overlap must be in 0..100 percent"));
    }
    Ok(())
}

/// Flatten regions into the engine's layout: `left, top, width, height` per region.
pub fn regions_to_floats(regions: &[ScanRegion]) -> Vec<f32> {
    regions
        .iter()
        .flat_map(|r| [r.left, r.top, r.width, r.height])
        .collect()
}

/// Rebuild regions from the engine's flat layout, ignoring a trailing partial region.
pub(crate) fn regions_from_floats(floats: &[f32]) -> Vec<ScanRegion> {
    floats
        .chunks_exact(4)
        .map(|c| ScanRegion {
            left: c[0],
            top: c[1],
            width: c[2],
            height: c[3],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(r: &ScanRegion) -> (f32, f32, f32, f32) {
        (r.left(), r.top(), r.width(), r.height())
    }

    #[test]
    fn test_single_tile_covers_image() {
        let regions = tiles_to_regions(1, 1, 0).unwrap();
        assert_eq!(regions, vec![ScanRegion::FULL]);

        // Overlap has nowhere to go on a single tile.
        let regions = tiles_to_regions(1, 1, 50).unwrap();
        assert_eq!(regions, vec![ScanRegion::FULL]);
    }

    #[test]
    fn test_two_columns_with_overlap() {
        let regions = tiles_to_regions(2, 1, 10).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(rect(&regions[0]), (0.0, 0.0, 55.0, 100.0));
        assert_eq!(rect(&regions[1]), (45.0, 0.0, 55.0, 100.0));
    }

    #[test]
    fn test_zero_overlap_is_exact_partition() {
        let regions = tiles_to_regions(4, 2, 0).unwrap();
        assert_eq!(regions.len(), 8);
        for (i, r) in regions.iter().enumerate() {
            let (row, col) = (i / 4, i % 4);
            assert_eq!(r.left(), col as f32 * 25.0);
            assert_eq!(r.top(), row as f32 * 50.0);
            assert_eq!(r.width(), 25.0);
            assert_eq!(r.height(), 50.0);
        }
    }

    #[test]
    fn test_row_major_order() {
        let regions = tiles_to_regions(2, 2, 0).unwrap();
        let origins: Vec<_> = regions.iter().map(|r| (r.left(), r.top())).collect();
        assert_eq!(
            origins,
            vec![(0.0, 0.0), (50.0, 0.0), (0.0, 50.0), (50.0, 50.0)]
        );
    }

    #[test]
    fn test_interior_tile_grows_on_all_sides() {
        let regions = tiles_to_regions(4, 4, 20).unwrap();
        // Tile (row 1, col 1): nominal 25..50 on both axes, padded by 5.
        assert_eq!(rect(&regions[5]), (20.0, 20.0, 35.0, 35.0));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            tiles_to_regions(0, 1, 0),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            tiles_to_regions(1, -2, 0),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            tiles_to_regions(2, 2, 100),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            tiles_to_regions(2, 2, -1),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            tiles_to_regions(i32::MAX, 2, 0),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_region_new_validation() {
        assert!(ScanRegion::new(10.0, 10.0, 50.0, 50.0).is_ok());
        assert!(ScanRegion::new(0.0, 0.0, 100.0, 100.0).is_ok());
        assert!(ScanRegion::new(-1.0, 0.0, 10.0, 10.0).is_err());
        assert!(ScanRegion::new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(ScanRegion::new(60.0, 0.0, 50.0, 10.0).is_err());
        assert!(ScanRegion::new(f32::NAN, 0.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_to_pixels_rounds_outward() {
        let region = ScanRegion::new(45.0, 0.0, 55.0, 100.0).unwrap();
        assert_eq!(region.to_pixels(640, 480), (288, 0, 352, 480));

        let third = tiles_to_regions(3, 1, 0).unwrap();
        assert_eq!(third[1].to_pixels(100, 10), (33, 0, 34, 10));
    }

    #[test]
    fn test_float_layout_round_trip() {
        let regions = tiles_to_regions(3, 2, 5).unwrap();
        let floats = regions_to_floats(&regions);
        assert_eq!(floats.len(), 24);
        assert_eq!(&floats[..4], &[0.0, 0.0, regions[0].width(), regions[0].height()]);
        assert_eq!(regions_from_floats(&floats), regions);
    }
}
