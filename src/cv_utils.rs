use image::RgbImage;
use log::error;
use opencv::core::{Point, Point2f, RotatedRect, Scalar, Vector};
use opencv::{self as cv, prelude::*};

use crate::error::{HoleError, Result};

/// Copy an `RgbImage` into a fresh `CV_8UC3` matrix, keeping RGB channel order.
pub fn rgb_to_mat(image: &RgbImage) -> Result<Mat> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(HoleError::InvalidImage(format!(
            "zero-area image ({}x{})",
            width, height
        )));
    }

    let mut phase = cv::core::Mat::new_rows_cols_with_default(
        height as i32,
        width as i32,
        cv::core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    phase.data_bytes_mut()?.copy_from_slice(image.as_raw());

    Ok(phase)
}

/// Copy a continuous `CV_8UC3` matrix back into an `RgbImage`.
pub fn mat_to_rgb(phase: &Mat) -> Result<RgbImage> {
    check_color_mat(phase)?;
    let data = phase.data_bytes()?.to_vec();
    RgbImage::from_raw(phase.cols() as u32, phase.rows() as u32, data)
        .ok_or_else(|| HoleError::InvalidImage("pixel buffer does not match dimensions".into()))
}

/// Reject anything that is not a non-empty 8-bit 3-channel image.
pub fn check_color_mat(phase: &Mat) -> Result<()> {
    if phase.empty() || phase.rows() == 0 || phase.cols() == 0 {
        return Err(HoleError::InvalidImage("empty matrix".into()));
    }
    if phase.typ() != cv::core::CV_8UC3 {
        return Err(HoleError::InvalidImage(format!(
            "expected 8-bit 3-channel pixels, got type {}",
            phase.typ()
        )));
    }
    if !phase.is_continuous() {
        return Err(HoleError::InvalidImage("non-continuous pixel buffer".into()));
    }
    Ok(())
}

pub fn to_hsv(phase: &Mat) -> Result<Mat> {
    let mut new_phase = cv::core::Mat::default();
    match cv::imgproc::cvt_color(phase, &mut new_phase, cv::imgproc::COLOR_RGB2HSV, 0) {
        Ok(_) => {}
        Err(err) => {
            error!("To HSV error: {}", err);
            return Err(err.into());
        }
    }

    Ok(new_phase)
}

/// Channel 2 of an HSV matrix: the brightness.
pub fn value_channel(hsv: &Mat) -> Result<Mat> {
    let mut new_phase = cv::core::Mat::default();
    cv::core::extract_channel(hsv, &mut new_phase, 2)?;

    Ok(new_phase)
}

/// Pixels strictly brighter than `threshold_value` become 255, all others 0.
pub fn threshold(phase: &Mat, threshold_value: u8) -> Result<Mat> {
    let mut new_phase = cv::core::Mat::default();
    cv::imgproc::threshold(
        phase,
        &mut new_phase,
        threshold_value as f64,
        255.0,
        cv::imgproc::THRESH_BINARY,
    )?;

    Ok(new_phase)
}

/// Outer boundaries of every white region, no hierarchy, collinear points dropped.
pub fn find_contours(phase: &Mat) -> Result<Vector<Vector<Point>>> {
    let mut contour_values: Vector<Vector<Point>> = Vector::new();
    cv::imgproc::find_contours(
        phase,
        &mut contour_values,
        cv::imgproc::RETR_LIST,
        cv::imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    Ok(contour_values)
}

pub fn contour_area(contour: &Vector<Point>) -> Result<f64> {
    Ok(cv::imgproc::contour_area(contour, false)?)
}

/// Arithmetic mean of the areas; 0 when there are none.
pub fn mean_area(areas: &[f64]) -> f64 {
    if areas.is_empty() {
        return 0.0;
    }
    areas.iter().sum::<f64>() / areas.len() as f64
}

/// Minimum-area rectangle around a contour, as its four corners and center.
pub fn min_area_rect(contour: &Vector<Point>) -> Result<OrientedBox> {
    let rect = cv::imgproc::min_area_rect(contour)?;
    OrientedBox::from_rotated_rect(&rect)
}

/// Corners and center of a rotated rectangle, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrientedBox {
    pub corners: [(f32, f32); 4],
    pub center: (f32, f32),
}

impl OrientedBox {
    pub fn from_rotated_rect(rect: &RotatedRect) -> Result<Self> {
        let mut points = [Point2f::default(); 4];
        rect.points(&mut points)?;

        Ok(Self {
            corners: points.map(|p| (p.x, p.y)),
            center: (rect.center.x, rect.center.y),
        })
    }

    /// Pixel position at `offset` from the center, truncated toward zero.
    pub fn anchor(&self, offset: (i32, i32)) -> Point {
        to_pixel((
            self.center.0 + offset.0 as f32,
            self.center.1 + offset.1 as f32,
        ))
    }
}

/// Truncates like OpenCV's `Point2d` to `Point` conversion in the Java bindings.
pub fn to_pixel(corner: (f32, f32)) -> Point {
    Point::new(corner.0 as i32, corner.1 as i32)
}
