//! Repair neighborhoods
//!
//! A pixel is repaired from the samples of a square window centred on it.
//! The window size depends on the aggregate and on whether the image is a
//! Bayer mosaic:
//!
//! | aggregate | CFA | step | radius | window |
//! |-----------|-----|------|--------|--------|
//! | median    | no  | 1    | 2      | 5x5    |
//! | median    | yes | 2    | 4      | 5x5 same color |
//! | mean      | no  | 1    | 1      | 3x3    |
//! | mean      | yes | 2    | 2      | 3x3 same color |
//!
//! In CFA mode the window steps by 2 so that only samples under the same
//! color filter as the centre are used. Window positions outside the image
//! are skipped, so edge pixels are repaired from fewer neighbors.

use cosmetica_core::{PixView, Sample};

/// Largest neighbor count of any window (5x5 minus the centre)
pub const MAX_NEIGHBORS: usize = 24;

/// How a set of neighbors is reduced to one replacement value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregator {
    /// Upper median (rank `n / 2`)
    Median,
    /// Mean rounded half away from zero
    Mean,
}

/// Which part of the window is left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exclusion {
    /// Only the centre sample (pointwise repair)
    Center,
    /// The entire centre row (scanline repair)
    Row,
}

/// Window shape for one aggregate / CFA combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    aggregator: Aggregator,
    is_cfa: bool,
    step: u32,
    radius: u32,
}

impl Geometry {
    /// Window shape for the given aggregate and mosaic mode.
    pub fn new(aggregator: Aggregator, is_cfa: bool) -> Self {
        let step = if is_cfa { 2 } else { 1 };
        let half = match aggregator {
            Aggregator::Median => 2,
            Aggregator::Mean => 1,
        };
        Self {
            aggregator,
            is_cfa,
            step,
            radius: half * step,
        }
    }

    /// Aggregate used with this window.
    pub fn aggregator(&self) -> Aggregator {
        self.aggregator
    }

    /// Whether the window follows the Bayer lattice.
    pub fn is_cfa(&self) -> bool {
        self.is_cfa
    }

    /// Distance between window samples.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Largest offset from the centre.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Neighbor count of a window lying fully inside the image.
    pub fn max_neighbors(&self, exclusion: Exclusion) -> usize {
        let side = (2 * self.radius / self.step + 1) as usize;
        match exclusion {
            Exclusion::Center => side * side - 1,
            Exclusion::Row => side * (side - 1),
        }
    }

    /// In-bounds neighbor coordinates of `(x, y)` in a `width x height`
    /// image, row by row from the top left.
    pub fn neighbors(
        self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        exclusion: Exclusion,
    ) -> impl Iterator<Item = (u32, u32)> {
        let r = i64::from(self.radius);
        let step = self.step as usize;
        let (cx, cy) = (i64::from(x), i64::from(y));
        let (w, h) = (i64::from(width), i64::from(height));

        (-r..=r)
            .step_by(step)
            .flat_map(move |dy| (-r..=r).step_by(step).map(move |dx| (dx, dy)))
            .filter(move |&(dx, dy)| match exclusion {
                Exclusion::Center => dx != 0 || dy != 0,
                Exclusion::Row => dy != 0,
            })
            .map(move |(dx, dy)| (cx + dx, cy + dy))
            .filter(move |&(nx, ny)| nx >= 0 && ny >= 0 && nx < w && ny < h)
            .map(|(nx, ny)| (nx as u32, ny as u32))
    }
}

/// Neighbor samples gathered into a fixed-capacity stack array
#[derive(Debug, Clone)]
pub struct Neighborhood<T: Sample> {
    values: [T; MAX_NEIGHBORS],
    len: usize,
}

impl<T: Sample> Neighborhood<T> {
    /// Gather the neighbors of `(x, y)` from `view`.
    pub fn collect(view: PixView<'_, T>, x: u32, y: u32, geometry: Geometry, exclusion: Exclusion) -> Self {
        let mut values = [T::default(); MAX_NEIGHBORS];
        let mut len = 0;
        for (nx, ny) in geometry.neighbors(x, y, view.width(), view.height(), exclusion) {
            if let Some(v) = view.get_pixel(nx, ny) {
                values[len] = v;
                len += 1;
            }
        }
        Self { values, len }
    }

    /// Number of neighbors gathered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no neighbor lies inside the image.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gathered samples in collection order (until an aggregate reorders them).
    pub fn values(&self) -> &[T] {
        &self.values[..self.len]
    }

    /// Upper median: the sample of rank `n / 2` in ascending order.
    ///
    /// Reorders the gathered samples.
    pub fn median(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let mid = self.len / 2;
        let (_, m, _) = self.values[..self.len].select_nth_unstable(mid);
        Some(*m)
    }

    /// Arithmetic mean rounded half away from zero.
    pub fn mean(&self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let sum: f64 = self.values().iter().map(|v| v.to_f64()).sum();
        Some(T::from_f64_round(sum / self.len as f64))
    }

    /// Reduce the neighbors with `aggregator`.
    pub fn aggregate(&mut self, aggregator: Aggregator) -> Option<T> {
        match aggregator {
            Aggregator::Median => self.median(),
            Aggregator::Mean => self.mean(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmetica_core::Pix;

    #[test]
    fn test_geometry_table() {
        let cases = [
            (Aggregator::Median, false, 1, 2, 24, 20),
            (Aggregator::Median, true, 2, 4, 24, 20),
            (Aggregator::Mean, false, 1, 1, 8, 6),
            (Aggregator::Mean, true, 2, 2, 8, 6),
        ];
        for (agg, cfa, step, radius, point, line) in cases {
            let g = Geometry::new(agg, cfa);
            assert_eq!(g.step(), step);
            assert_eq!(g.radius(), radius);
            assert_eq!(g.max_neighbors(Exclusion::Center), point);
            assert_eq!(g.max_neighbors(Exclusion::Row), line);
        }
    }

    #[test]
    fn test_corner_neighbors() {
        let g = Geometry::new(Aggregator::Median, false);
        let coords: Vec<_> = g.neighbors(0, 0, 10, 10, Exclusion::Center).collect();
        // (radius + 1)^2 - 1
        assert_eq!(coords.len(), 8);
        assert!(!coords.contains(&(0, 0)));
        assert!(coords.iter().all(|&(x, y)| x <= 2 && y <= 2));
    }

    #[test]
    fn test_cfa_neighbors_same_parity() {
        let g = Geometry::new(Aggregator::Mean, true);
        let coords: Vec<_> = g.neighbors(5, 4, 20, 20, Exclusion::Center).collect();
        assert_eq!(
            coords,
            vec![(3, 2), (5, 2), (7, 2), (3, 4), (7, 4), (3, 6), (5, 6), (7, 6)]
        );
    }

    #[test]
    fn test_row_exclusion() {
        let g = Geometry::new(Aggregator::Mean, false);
        let coords: Vec<_> = g.neighbors(3, 3, 10, 10, Exclusion::Row).collect();
        assert_eq!(coords.len(), 6);
        assert!(coords.iter().all(|&(_, y)| y != 3));
    }

    #[test]
    fn test_median_is_upper() {
        let pix = Pix::<u16>::from_vec(3, 1, vec![10, 0, 20]).unwrap();
        let g = Geometry::new(Aggregator::Median, false);
        let mut n = Neighborhood::collect(pix.view(), 1, 0, g, Exclusion::Center);
        assert_eq!(n.values(), &[10, 20]);
        assert_eq!(n.median(), Some(20));
    }

    #[test]
    fn test_mean_rounds_half_away() {
        let pix = Pix::<u16>::from_vec(3, 1, vec![1, 0, 2]).unwrap();
        let g = Geometry::new(Aggregator::Mean, false);
        let n = Neighborhood::collect(pix.view(), 1, 0, g, Exclusion::Center);
        assert_eq!(n.mean(), Some(2));
    }

    #[test]
    fn test_single_pixel_is_empty() {
        let pix = Pix::<u16>::from_vec(1, 1, vec![7]).unwrap();
        let g = Geometry::new(Aggregator::Median, true);
        let mut n = Neighborhood::collect(pix.view(), 0, 0, g, Exclusion::Center);
        assert!(n.is_empty());
        assert_eq!(n.aggregate(Aggregator::Median), None);
        assert_eq!(n.aggregate(Aggregator::Mean), None);
    }
}
