use image::RgbImage;
use log::{debug, trace};
use opencv::prelude::*;

use crate::cv_utils::{
    check_color_mat, contour_area, find_contours, mat_to_rgb, mean_area, min_area_rect,
    rgb_to_mat, threshold, to_hsv, value_channel,
};
use crate::draw::{draw_label, draw_oriented_box};
use crate::error::Result;
use crate::hole::{Hole, HoleKind};
use crate::params::DetectorParams;

/// Annotated copy of the input plus what was found on it.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub image: RgbImage,
    /// Total holes, twins counted twice.
    pub hole_count: u32,
    /// One entry per bright region, in labelling order.
    pub holes: Vec<Hole>,
}

/// Finds bright near-circular holes, boxes and numbers them.
///
/// Holes are numbered from 1 in the order the contour extraction returns
/// them, which is not a spatial order. A region whose area exceeds
/// `twin_area_ratio` times the mean region area is taken as two merged holes
/// and gets a second label.
#[derive(Debug, Clone, Default)]
pub struct HoleDetector {
    params: DetectorParams,
}

impl HoleDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn detect(&self, image: &RgbImage) -> Result<DetectionResult> {
        let source = rgb_to_mat(image)?;
        let (annotated, holes) = self.annotate(&source)?;

        Ok(DetectionResult {
            image: mat_to_rgb(&annotated)?,
            hole_count: holes.iter().map(Hole::count).sum(),
            holes,
        })
    }

    /// Same as [`HoleDetector::detect`] for a `CV_8UC3` matrix in RGB order.
    /// Returns the annotated matrix and the hole records.
    pub fn detect_mat(&self, source: &Mat) -> Result<(Mat, Vec<Hole>)> {
        check_color_mat(source)?;
        self.annotate(source)
    }

    fn annotate(&self, source: &Mat) -> Result<(Mat, Vec<Hole>)> {
        let hsv = to_hsv(source)?;
        let brightness = value_channel(&hsv)?;
        let mask = threshold(&brightness, self.params.threshold)?;
        let contours = find_contours(&mask)?;

        let areas = contours
            .iter()
            .map(|contour| contour_area(&contour))
            .collect::<Result<Vec<_>>>()?;
        let average_area = mean_area(&areas);
        let twin_limit = self.params.twin_limit(average_area);
        debug!(
            "found {} bright regions, mean area {:.1}, twin above {:.1}",
            contours.len(),
            average_area,
            twin_limit
        );

        let color = self.params.scalar_color();
        let mut phase = source.try_clone()?;
        let mut holes = Vec::with_capacity(contours.len());
        let mut holes_count = 0;

        for (contour, area) in contours.iter().zip(areas) {
            let bounds = min_area_rect(&contour)?;
            draw_oriented_box(&bounds, color, self.params.stroke_width, &mut phase)?;

            let kind = if area > twin_limit {
                HoleKind::Twin
            } else {
                HoleKind::Single
            };
            let hole = Hole::new(holes_count + 1, kind, area, bounds);
            let offsets = [self.params.label_offset, self.params.twin_label_offset];
            for (text, offset) in hole.label_texts().iter().zip(offsets) {
                draw_label(text, bounds.anchor(offset), color, self.params.font_scale, &mut phase)?;
            }
            holes_count += hole.count();

            trace!(
                "hole {:?} ({}) area {:.1} center ({:.1}, {:.1})",
                hole.labels,
                kind,
                area,
                bounds.center.0,
                bounds.center.1
            );
            holes.push(hole);
        }

        debug!("{} holes labelled", holes_count);
        Ok((phase, holes))
    }
}
