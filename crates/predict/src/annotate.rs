use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, BresenhamLineIter},
    rect::Rect,
};
use mask::Contour;

use crate::config::AnnotationStyle;

/// Draws contour outlines (not filled masks) onto the working image.
#[derive(Debug, Clone)]
pub struct Annotator {
    pub color: Rgb<u8>,
    pub line_width: u32,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::from(&AnnotationStyle::default())
    }
}

impl From<&AnnotationStyle> for Annotator {
    fn from(style: &AnnotationStyle) -> Self {
        Self {
            color: Rgb(style.color),
            line_width: style.line_width.max(1),
        }
    }
}

impl Annotator {
    /// Draw the closed polyline through the contour's points.
    pub fn draw(&self, image: &mut RgbImage, contour: &Contour) {
        let points = &contour.points;
        match points.len() {
            0 => {}
            1 => self.stamp(image, points[0][0] as i32, points[0][1] as i32),
            n => {
                for i in 0..n {
                    let [x0, y0] = points[i];
                    let [x1, y1] = points[(i + 1) % n];
                    for (x, y) in BresenhamLineIter::new((x0, y0), (x1, y1)) {
                        self.stamp(image, x, y);
                    }
                }
            }
        }
    }

    /// A `line_width`-sided square centred on the pixel, clipped to the image.
    fn stamp(&self, image: &mut RgbImage, x: i32, y: i32) {
        let offset = (self.line_width / 2) as i32;
        let rect = Rect::at(x - offset, y - offset).of_size(self.line_width, self.line_width);
        draw_filled_rect_mut(image, rect, self.color);
    }
}
