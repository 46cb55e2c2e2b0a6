//! Artifact persistence
//!
//! Writes the images of a pipeline run as PNG files into an explicit
//! output directory, named `{kind}_{name}.png` after the input stem.

use crate::chart::{DEFAULT_CHART_HEIGHT, render_histogram};
use crate::pipeline::PipelineOutput;
use crate::PipelineResult;
use quadbit_core::{BandStack, Pix};
use quadbit_io::{ImageFormat, write_image};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths written for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSet {
    pub gray: PathBuf,
    pub binary: PathBuf,
    pub histogram: PathBuf,
    pub opened: PathBuf,
    pub closed: PathBuf,
    pub labeled: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound: Option<PathBuf>,
}

/// Writes artifacts into one output directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{dir}/{kind}_{name}.png`
    pub fn path_for(&self, kind: &str, name: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.png", kind, name))
    }

    fn write(&self, pix: &Pix, kind: &str, name: &str) -> PipelineResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(kind, name);
        write_image(pix, &path, ImageFormat::Png)?;
        info!(
            path = %path.display(),
            width = pix.width(),
            height = pix.height(),
            "artifact written"
        );
        Ok(path)
    }

    /// Write every artifact of `output` for the input stem `name`.
    ///
    /// `gray` is the 8 bpp image the pipeline worked on. The mask is saved
    /// as 0/255 gray; opened, closed and labeled images are min-max
    /// stretched to 0..=255.
    pub fn save(&self, name: &str, output: &PipelineOutput) -> PipelineResult<ArtifactSet> {
        let binary = output.mask().convert_1_to_8(0, 255)?;
        let chart = render_histogram(&output.histogram, DEFAULT_CHART_HEIGHT)?;
        let morph = &output.morphology;

        let compound = match &output.compound {
            Some(pix) => Some(self.write(pix, "compound", name)?),
            None => None,
        };

        Ok(ArtifactSet {
            gray: self.write(&output.gray, "gray", name)?,
            binary: self.write(&binary, "binary", name)?,
            histogram: self.write(&chart, "histogram", name)?,
            opened: self.write(&morph.opened_display()?, "opened", name)?,
            closed: self.write(&morph.closed_display()?, "closed", name)?,
            labeled: self.write(&morph.labeled_display()?, "labeled", name)?,
            compound,
        })
    }

    /// Write each band as `band_{i}_{name}.png`.
    pub fn save_bands(&self, name: &str, bands: &BandStack) -> PipelineResult<Vec<PathBuf>> {
        bands
            .bands()
            .iter()
            .enumerate()
            .map(|(i, band)| self.write(band, &format!("band_{}", i), name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for() {
        let store = ArtifactStore::new("/tmp/out");
        assert_eq!(
            store.path_for("binary", "cells"),
            PathBuf::from("/tmp/out/binary_cells.png")
        );
        assert_eq!(store.dir(), Path::new("/tmp/out"));
    }

    #[test]
    fn test_artifact_set_json_skips_missing_compound() {
        let set = ArtifactSet {
            gray: "g.png".into(),
            binary: "b.png".into(),
            histogram: "h.png".into(),
            opened: "o.png".into(),
            closed: "c.png".into(),
            labeled: "l.png".into(),
            compound: None,
        };
        let json = serde_json::to_string(&set).unwrap();
        assert!(!json.contains("compound"));
        assert!(json.contains("\"labeled\":\"l.png\""));
    }
}
