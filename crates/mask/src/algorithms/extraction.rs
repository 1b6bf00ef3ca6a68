use image::GrayImage;
use imageproc::contours::BorderType;
use tracing::trace;
use crate::{
    algorithms::outline::trace_outline,
    error::Result,
    traits::ContourExtractor,
    types::{AreaConvention, Contour},
};

/// Imageproc-based extractor that keeps only the outermost borders.
///
/// Hole borders are dropped, and so are outer borders nested inside a hole of
/// another region.
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor {
    pub convention: AreaConvention,
}

impl ExternalContourExtractor {
    pub fn new(convention: AreaConvention) -> Self {
        Self { convention }
    }
}

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, binary: &GrayImage) -> Result<Vec<Contour>> {
        // The border follower misclassifies regions that start in column 0,
        // so it runs on a copy framed by one background pixel.
        let framed = frame(binary);
        let borders = imageproc::contours::find_contours::<i32>(&framed);

        let mut contours = Vec::new();
        for border in borders {
            if !matches!(border.border_type, BorderType::Outer) || border.parent.is_some() {
                continue;
            }

            // The raster-first pixel of a region always lies on its outer border.
            let Some(start) = border.points.iter().min_by_key(|p| (p.y, p.x)) else {
                continue;
            };
            let outline = trace_outline(binary, ((start.x - 1) as u32, (start.y - 1) as u32))?;

            let points = border.points
                .iter()
                .map(|p| [(p.x - 1) as f32, (p.y - 1) as f32])
                .collect();

            let contour = Contour::new(points, outline, self.convention);
            trace!(points = contour.points.len(), area = contour.area, "external contour");
            contours.push(contour);
        }

        Ok(contours)
    }
}

/// `binary` surrounded by a one pixel background border.
fn frame(binary: &GrayImage) -> GrayImage {
    let mut framed = GrayImage::new(binary.width() + 2, binary.height() + 2);
    image::imageops::replace(&mut framed, binary, 1, 1);
    framed
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(image: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                image.put_pixel(x, y, Luma([255u8]));
            }
        }
    }

    #[test]
    fn square_area_under_both_conventions() {
        let mut image = GrayImage::new(100, 100);
        fill(&mut image, 45, 45, 10, 10);

        let edges = ExternalContourExtractor::new(AreaConvention::PixelEdges)
            .extract_contours(&image)
            .expect("extract");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].area, 100.0);

        let centers = ExternalContourExtractor::new(AreaConvention::PixelCenters)
            .extract_contours(&image)
            .expect("extract");
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].area, 81.0);
    }

    #[test]
    fn holes_are_not_reported_but_are_enclosed() {
        let mut image = GrayImage::new(40, 40);
        fill(&mut image, 5, 5, 20, 20);
        for y in 10..20 {
            for x in 10..20 {
                image.put_pixel(x, y, Luma([0u8]));
            }
        }

        let contours = ExternalContourExtractor::default()
            .extract_contours(&image)
            .expect("extract");
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area, 400.0);
    }

    #[test]
    fn islands_inside_holes_are_skipped() {
        let mut image = GrayImage::new(40, 40);
        fill(&mut image, 5, 5, 30, 30);
        for y in 10..30 {
            for x in 10..30 {
                image.put_pixel(x, y, Luma([0u8]));
            }
        }
        fill(&mut image, 18, 18, 4, 4);

        let contours = ExternalContourExtractor::default()
            .extract_contours(&image)
            .expect("extract");
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn regions_on_the_left_edge_are_found() {
        let mut image = GrayImage::new(100, 100);
        fill(&mut image, 0, 0, 10, 10);
        fill(&mut image, 0, 40, 10, 10);

        let contours = ExternalContourExtractor::default()
            .extract_contours(&image)
            .expect("extract");
        let areas: Vec<f32> = contours.iter().map(|c| c.area).collect();
        assert_eq!(areas, vec![100.0, 100.0]);
        assert_eq!(contours[0].bounding_box(), ([0.0, 0.0], [9.0, 9.0]));
        assert_eq!(contours[1].bounding_box(), ([0.0, 40.0], [9.0, 49.0]));
    }

    #[test]
    fn regions_on_every_edge_are_found() {
        let mut image = GrayImage::new(12, 12);
        for (x, y) in [(0, 5), (5, 0), (11, 5), (5, 11)] {
            image.put_pixel(x, y, Luma([255u8]));
        }

        let contours = ExternalContourExtractor::default()
            .extract_contours(&image)
            .expect("extract");
        assert_eq!(contours.len(), 4);
        assert!(contours.iter().all(|c| c.area == 1.0));
    }

    #[test]
    fn full_foreground_is_one_region() {
        let image = GrayImage::from_pixel(7, 5, Luma([255u8]));

        let contours = ExternalContourExtractor::default()
            .extract_contours(&image)
            .expect("extract");
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area, 35.0);
        assert_eq!(contours[0].bounding_box(), ([0.0, 0.0], [6.0, 4.0]));
    }

    #[test]
    fn lone_pixel_is_forwarded() {
        let mut image = GrayImage::new(10, 10);
        image.put_pixel(4, 6, Luma([255u8]));

        let contours = ExternalContourExtractor::default()
            .extract_contours(&image)
            .expect("extract");
        assert_eq!(contours.len(), 1);
        assert!(contours[0].points.iter().all(|&p| p == [4.0, 6.0]));
        assert_eq!(contours[0].area, 1.0);
    }

    #[test]
    fn empty_image_has_no_contours() {
        let image = GrayImage::new(16, 16);
        let contours = ExternalContourExtractor::default()
            .extract_contours(&image)
            .expect("extract");
        assert!(contours.is_empty());
    }
}
