//! JSON report of a pipeline run

use crate::artifacts::ArtifactSet;
use crate::config::PipelineConfig;
use crate::pipeline::{PipelineOutput, QuadrantRegions};
use crate::PipelineResult;
use quadbit_core::Histogram;
use quadbit_region::{Quadrant, Region};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Regions of one quadrant, as `[row, col]` pairs local to its box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantReport {
    pub quadrant: Quadrant,
    pub regions: Vec<Region>,
}

impl QuadrantReport {
    pub fn from_regions(quadrants: &[QuadrantRegions]) -> Vec<QuadrantReport> {
        quadrants
            .iter()
            .map(|(quadrant, regions)| QuadrantReport {
                quadrant: *quadrant,
                regions: regions.clone(),
            })
            .collect()
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// `[width, height]`
    pub image_size: [u32; 2],
    pub threshold: u32,
    pub overlap: bool,
    pub margin: i32,
    pub quadrants: Vec<QuadrantReport>,
    pub region_count: usize,
    pub component_count: u32,
    pub histogram: Histogram,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ArtifactSet>,
}

impl PipelineReport {
    pub fn new(config: &PipelineConfig, output: &PipelineOutput) -> Self {
        Self {
            image_size: [output.gray.width(), output.gray.height()],
            threshold: config.threshold,
            overlap: config.overlap,
            margin: config.margin,
            quadrants: QuadrantReport::from_regions(&output.segmentation.quadrants),
            region_count: output.region_count(),
            component_count: output.component_count(),
            histogram: output.histogram.clone(),
            artifacts: None,
        }
    }

    /// Attach the paths written by an [`ArtifactStore`](crate::ArtifactStore)
    pub fn with_artifacts(mut self, artifacts: ArtifactSet) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    pub fn to_json_pretty(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> PipelineResult<()> {
        std::fs::write(path.as_ref(), self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use quadbit_core::Pix;

    #[test]
    fn test_report_json_shape() {
        let config = PipelineConfig::classic();
        let pix = Pix::from_gray_rows(&[[255u8, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]).unwrap();
        let output = Pipeline::new(config.clone()).unwrap().run(&pix).unwrap();
        let report = PipelineReport::new(&config, &output);
        assert_eq!(report.image_size, [4, 3]);
        assert_eq!(report.region_count, 1);

        let value: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["quadrants"][0]["quadrant"]["position"], "top_left");
        assert_eq!(value["quadrants"][0]["regions"][0][0], serde_json::json!([0, 0]));
        assert_eq!(value["histogram"]["counts"][0], 11);
        assert!(value.get("artifacts").is_none());

        let back: PipelineReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }
}
