use crate::{
    error::Result,
    traits::{ContourPostProcessor, ContourSimplifier},
    types::Contour,
};

/// Collapses runs of collinear boundary points, keeping only the points where
/// the chain direction changes. The enclosed polygon is unchanged.
#[derive(Debug, Clone, Default)]
pub struct CollinearSimplifier;

impl CollinearSimplifier {
    fn collapse(points: &[[f32; 2]]) -> Vec<[f32; 2]> {
        let mut ring: Vec<[f32; 2]> = Vec::with_capacity(points.len());
        for &point in points {
            if ring.last() != Some(&point) {
                ring.push(point);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return ring;
        }

        let n = ring.len();
        let step = |a: [f32; 2], b: [f32; 2]| {
            let dx = b[0] - a[0];
            let dy = b[1] - a[1];
            let len = dx.abs().max(dy.abs());
            [dx / len, dy / len]
        };

        (0..n)
            .filter(|&i| {
                let prev = ring[(i + n - 1) % n];
                let next = ring[(i + 1) % n];
                step(prev, ring[i]) != step(ring[i], next)
            })
            .map(|i| ring[i])
            .collect()
    }
}

impl ContourSimplifier for CollinearSimplifier {
    fn simplify(&self, contours: &mut [Contour]) -> Result<()> {
        for contour in contours {
            contour.points = Self::collapse(&contour.points);
        }
        Ok(())
    }
}

/// Drops contours whose area is below `min_area`
#[derive(Debug, Clone)]
pub struct MinimumAreaFilter {
    pub min_area: f32,
}

impl ContourPostProcessor for MinimumAreaFilter {
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()> {
        contours.retain(|contour| contour.area >= self.min_area);
        Ok(())
    }
}
