use geo_types::{Coord, LineString, Polygon};
use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Per-pixel foreground probabilities in `[0, 1]`, laid out like the source image.
pub type ProbabilityMask = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Which boundary polygon a contour's area is measured on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AreaConvention {
    /// Pixel-corner outline: a filled k x k square measures k².
    #[default]
    PixelEdges,
    /// Polygon through the boundary pixel centres: a filled k x k square
    /// measures (k - 1)² and a lone pixel measures 0.
    PixelCenters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskOutline {
    /// External contours in tracer order
    pub contours: Vec<Contour>,
    /// Original mask dimensions
    pub mask_width: u32,
    pub mask_height: u32,
}

impl MaskOutline {
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// The external boundary of one connected foreground region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    /// Boundary pixel centres, ordered, with collinear runs collapsed
    pub points: Vec<[f32; 2]>,
    /// Pixel-corner outline of the region, corner vertices only
    pub outline: Vec<[f32; 2]>,
    /// Enclosed area in pixel units
    pub area: f32,
}

impl Contour {
    pub fn new(points: Vec<[f32; 2]>, outline: Vec<[f32; 2]>, convention: AreaConvention) -> Self {
        let mut contour = Self {
            points,
            outline,
            area: 0.0,
        };
        contour.area = contour.measure(convention);
        contour
    }

    /// Area of the polygon through the boundary pixel centres
    pub fn center_area(&self) -> f32 {
        ring_area(&self.points)
    }

    /// Area enclosed by the pixel-corner outline
    pub fn outline_area(&self) -> f32 {
        ring_area(&self.outline)
    }

    pub fn measure(&self, convention: AreaConvention) -> f32 {
        match convention {
            AreaConvention::PixelEdges => self.outline_area(),
            AreaConvention::PixelCenters => self.center_area(),
        }
    }

    /// Get the bounding box of the boundary points
    pub fn bounding_box(&self) -> ([f32; 2], [f32; 2]) {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];

        for &[x, y] in &self.points {
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
        }

        (min, max)
    }
}

/// Convert a closed ring to a geo-types Polygon. Coordinates are widened to
/// f64 so the shoelace sum stays exact for large masks.
pub fn ring_to_polygon(ring: &[[f32; 2]]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring
        .iter()
        .map(|&[x, y]| Coord {
            x: f64::from(x),
            y: f64::from(y),
        })
        .collect();

    Polygon::new(LineString::new(coords), vec![])
}

fn ring_area(ring: &[[f32; 2]]) -> f32 {
    use geo::Area;

    if ring.len() < 3 {
        return 0.0;
    }
    ring_to_polygon(ring).unsigned_area() as f32
}
