use itertools::Itertools;
use log::error;
use opencv::core::Scalar;
use opencv::{self as cv, prelude::*};

use crate::cv_utils::{to_pixel, OrientedBox};
use crate::error::Result;

/// Outline the rectangle: corner i to corner (i + 1) % 4.
pub fn draw_oriented_box(
    oriented: &OrientedBox,
    color: Scalar,
    thickness: i32,
    phase: &mut Mat,
) -> Result<()> {
    for (from, to) in oriented.corners.iter().circular_tuple_windows() {
        match cv::imgproc::line(
            phase,
            to_pixel(*from),
            to_pixel(*to),
            color,
            thickness,
            cv::imgproc::LINE_8,
            0,
        ) {
            Ok(_) => {}
            Err(err) => {
                error!("Error on draw_oriented_box - error: {}", err);
                return Err(err.into());
            }
        }
    }
    Ok(())
}

pub fn draw_label(
    text: &str,
    origin: cv::core::Point,
    color: Scalar,
    font_scale: f64,
    phase: &mut Mat,
) -> Result<()> {
    cv::imgproc::put_text(
        phase,
        text,
        origin,
        cv::imgproc::FONT_HERSHEY_PLAIN,
        font_scale,
        color,
        1,
        cv::imgproc::LINE_8,
        false,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black(size: i32) -> Mat {
        Mat::new_rows_cols_with_default(size, size, cv::core::CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    fn red_pixels(phase: &Mat) -> usize {
        phase
            .data_bytes()
            .unwrap()
            .chunks(3)
            .filter(|px| *px == [255, 0, 0])
            .count()
    }

    #[test]
    fn box_edges_touch_every_corner() {
        let mut phase = black(40);
        let oriented = OrientedBox {
            corners: [(10.0, 10.0), (30.0, 10.0), (30.0, 30.0), (10.0, 30.0)],
            center: (20.0, 20.0),
        };
        draw_oriented_box(&oriented, Scalar::new(255.0, 0.0, 0.0, 255.0), 2, &mut phase).unwrap();

        for (x, y) in oriented.corners {
            let px = phase.at_2d::<cv::core::Vec3b>(y as i32, x as i32).unwrap();
            assert_eq!(px.0, [255, 0, 0]);
        }
        // interior stays untouched
        assert_eq!(phase.at_2d::<cv::core::Vec3b>(20, 20).unwrap().0, [0, 0, 0]);
    }

    #[test]
    fn label_draws_something() {
        let mut phase = black(60);
        draw_label("7", cv::core::Point::new(20, 30), Scalar::new(255.0, 0.0, 0.0, 255.0), 1.5, &mut phase)
            .unwrap();
        assert!(red_pixels(&phase) > 0);
    }
}
