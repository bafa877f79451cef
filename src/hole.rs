use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::cv_utils::OrientedBox;

#[derive(EnumIter, Display, Debug, Hash, Eq, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HoleKind {
    Single,
    /// Two adjacent holes merged into one bright region.
    Twin,
}

/// One detected bright region and the labels it was given.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Hole {
    pub labels: Vec<u32>,
    pub kind: HoleKind,
    pub area: f64,
    pub bounds: OrientedBox,
}

impl Hole {
    pub fn new(first_label: u32, kind: HoleKind, area: f64, bounds: OrientedBox) -> Self {
        let labels = match kind {
            HoleKind::Single => vec![first_label],
            HoleKind::Twin => vec![first_label, first_label + 1],
        };
        Self {
            labels,
            kind,
            area,
            bounds,
        }
    }

    /// Number of holes this region accounts for.
    pub fn count(&self) -> u32 {
        self.labels.len() as u32
    }

    /// Texts burned into the image, in drawing order: "N", then ", N" for a twin.
    pub fn label_texts(&self) -> Vec<String> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| match i {
                0 => label.to_string(),
                _ => format!(", {}", label),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> OrientedBox {
        OrientedBox {
            corners: [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            center: (2.0, 2.0),
        }
    }

    #[test]
    fn single_hole_has_one_label() {
        let hole = Hole::new(3, HoleKind::Single, 16.0, bounds());
        assert_eq!(hole.count(), 1);
        assert_eq!(hole.label_texts(), vec!["3"]);
    }

    #[test]
    fn twin_hole_takes_next_label() {
        let hole = Hole::new(5, HoleKind::Twin, 40.0, bounds());
        assert_eq!(hole.labels, vec![5, 6]);
        assert_eq!(hole.label_texts(), vec!["5", ", 6"]);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(HoleKind::Twin.to_string(), "twin");
        assert_eq!(serde_json::to_string(&HoleKind::Single).unwrap(), "\"single\"");
    }
}
