//! Pixel-corner ("crack") outline tracing.
//!
//! Walks the boundary between foreground and background pixels along pixel
//! edges, keeping foreground on the right-hand side. Diagonal foreground
//! neighbours are joined, which matches the 8-connectivity used by the
//! border follower, so one region always yields one closed outline.

use image::GrayImage;
use crate::error::{MaskError, Result};

type Step = (i64, i64);

const EAST: Step = (1, 0);

fn turn_left((dx, dy): Step) -> Step {
    (dy, -dx)
}

fn turn_right((dx, dy): Step) -> Step {
    (-dy, dx)
}

fn is_foreground(binary: &GrayImage, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x >= i64::from(binary.width()) || y >= i64::from(binary.height()) {
        return false;
    }
    binary.get_pixel(x as u32, y as u32)[0] > 0
}

/// The pixel touching `vertex` on the `(sx, sy)` diagonal.
fn pixel_towards(vertex: Step, (sx, sy): Step) -> Step {
    let offset = |s: i64| if s > 0 { 0 } else { -1 };
    (vertex.0 + offset(sx), vertex.1 + offset(sy))
}

/// Trace the outer outline of the region whose first pixel in raster order is
/// `start`. Returns the corner vertices of the closed outline.
pub fn trace_outline(binary: &GrayImage, start: (u32, u32)) -> Result<Vec<[f32; 2]>> {
    let origin: Step = (i64::from(start.0), i64::from(start.1));
    if !is_foreground(binary, origin.0, origin.1) {
        return Err(MaskError::ImageProcessing(format!(
            "outline start ({}, {}) is not a foreground pixel",
            start.0, start.1
        )));
    }

    // Each edge is visited at most once per direction.
    let max_steps = 4 * (u64::from(binary.width()) + 1) * (u64::from(binary.height()) + 1);

    let mut vertex = origin;
    let mut heading = EAST;
    let mut corners = Vec::new();

    for _ in 0..max_steps {
        vertex = (vertex.0 + heading.0, vertex.1 + heading.1);

        let right = turn_right(heading);
        let (lx, ly) = pixel_towards(vertex, (heading.0 - right.0, heading.1 - right.1));
        let (rx, ry) = pixel_towards(vertex, (heading.0 + right.0, heading.1 + right.1));

        let next = if is_foreground(binary, lx, ly) {
            turn_left(heading)
        } else if is_foreground(binary, rx, ry) {
            heading
        } else {
            right
        };

        if next != heading {
            corners.push([vertex.0 as f32, vertex.1 as f32]);
        }
        heading = next;

        if vertex == origin && heading == EAST {
            return Ok(corners);
        }
    }

    Err(MaskError::ImageProcessing(format!(
        "outline starting at ({}, {}) did not close",
        start.0, start.1
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn paint(image: &mut GrayImage, pixels: &[(u32, u32)]) {
        for &(x, y) in pixels {
            image.put_pixel(x, y, Luma([255u8]));
        }
    }

    #[test]
    fn single_pixel_outline_is_unit_square() {
        let mut image = GrayImage::new(5, 5);
        paint(&mut image, &[(2, 3)]);

        let outline = trace_outline(&image, (2, 3)).expect("closed outline");
        assert_eq!(outline, vec![[3.0, 3.0], [3.0, 4.0], [2.0, 4.0], [2.0, 3.0]]);
    }

    #[test]
    fn rectangle_touching_the_border() {
        let mut image = GrayImage::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                image.put_pixel(x, y, Luma([255u8]));
            }
        }

        let outline = trace_outline(&image, (0, 0)).expect("closed outline");
        assert_eq!(outline, vec![[4.0, 0.0], [4.0, 3.0], [0.0, 3.0], [0.0, 0.0]]);
    }

    #[test]
    fn diagonal_neighbours_share_one_outline() {
        let mut image = GrayImage::new(4, 4);
        paint(&mut image, &[(1, 1), (2, 2)]);

        let outline = trace_outline(&image, (1, 1)).expect("closed outline");
        // Two unit squares joined at the (2, 2) corner.
        assert_eq!(outline.len(), 8);
        assert_eq!(outline.iter().filter(|&&p| p == [2.0, 2.0]).count(), 2);
    }

    #[test]
    fn background_start_is_rejected() {
        let image = GrayImage::new(3, 3);
        assert!(trace_outline(&image, (1, 1)).is_err());
    }
}
