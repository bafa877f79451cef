use std::sync::OnceLock;

use log::{info, warn};
use strum_macros::Display;

use crate::error::{DependencyError, Result};
use crate::hole_detector::HoleDetector;
use crate::params::DetectorParams;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Uninitialized,
    Ready,
}

/// Two-state gate in front of the vision library.
///
/// The calling layer owns the gate, runs [`VisionGate::initialize`] once the
/// library can be loaded and only then asks it for a detector. The probe runs
/// at most once successfully; a failed probe leaves the gate uninitialized so
/// it can be retried.
#[derive(Debug, Default)]
pub struct VisionGate {
    version: OnceLock<String>,
}

impl VisionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&self) -> Result<&str> {
        if let Some(version) = self.version.get() {
            return Ok(version.as_str());
        }

        match opencv::core::get_version_string() {
            Ok(version) => {
                let version = self.version.get_or_init(|| version);
                info!("OpenCV {} loaded successfully", version);
                Ok(version.as_str())
            }
            Err(err) => {
                warn!("OpenCV probe failed: {}", err);
                Err(err.into())
            }
        }
    }

    pub fn readiness(&self) -> Readiness {
        match self.version.get() {
            Some(_) => Readiness::Ready,
            None => Readiness::Uninitialized,
        }
    }

    pub fn library_version(&self) -> Option<&str> {
        self.version.get().map(String::as_str)
    }

    pub fn detector(&self, params: DetectorParams) -> Result<HoleDetector> {
        match self.readiness() {
            Readiness::Ready => Ok(HoleDetector::new(params)),
            Readiness::Uninitialized => Err(DependencyError::NotReady.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HoleError;

    #[test]
    fn new_gate_refuses_detectors() {
        let gate = VisionGate::new();
        assert_eq!(gate.readiness(), Readiness::Uninitialized);
        let err = gate.detector(DetectorParams::default()).unwrap_err();
        assert!(matches!(
            err,
            HoleError::DependencyUnavailable(DependencyError::NotReady)
        ));
    }

    #[test]
    fn initialized_gate_hands_out_detectors() {
        let gate = VisionGate::new();
        let version = gate.initialize().unwrap().to_string();
        assert!(!version.is_empty());
        assert_eq!(gate.readiness(), Readiness::Ready);
        assert_eq!(gate.library_version(), Some(version.as_str()));
        // second call does not probe again
        assert_eq!(gate.initialize().unwrap(), version);

        let params = DetectorParams {
            twin_area_ratio: 2.0,
            ..DetectorParams::default()
        };
        let detector = gate.detector(params.clone()).unwrap();
        assert_eq!(detector.params(), &params);
    }
}
