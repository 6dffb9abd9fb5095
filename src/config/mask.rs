use crate::image::MaskFlags;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct MaskToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Mask image with the same shape as `input`. No masking when absent.
    #[serde(default)]
    pub mask: Option<PathBuf>,
    /// Mask planes to reject, e.g. `"BAD | SAT | CR"`.
    #[serde(default = "default_flags")]
    pub flags: MaskFlags,
    /// Reset every pixel to this value before masking.
    #[serde(default)]
    pub fill: Option<f32>,
    pub output: MaskOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct MaskOutputConfig {
    #[serde(rename = "image")]
    pub image: PathBuf,
    #[serde(default)]
    pub preview: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

fn default_flags() -> MaskFlags {
    MaskFlags::DEFAULT_REJECT
}

pub fn load_config(path: &Path) -> Result<MaskToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<MaskToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "input": "sci.fits", "output": { "image": "out.fits" } }"#)
            .unwrap();
        assert_eq!(cfg.input, PathBuf::from("sci.fits"));
        assert!(cfg.mask.is_none());
        assert_eq!(cfg.flags, MaskFlags::DEFAULT_REJECT);
        assert!(cfg.fill.is_none());
        assert!(cfg.output.preview.is_none());
    }

    #[test]
    fn full_config_parses_flag_names() {
        let cfg = parse_config(
            r#"{
                "input": "sci.fits",
                "mask": "mask.fits",
                "flags": "SAT | EDGE",
                "fill": 0.0,
                "output": {
                    "image": "out/masked.fits",
                    "preview": "out/masked.png",
                    "report_json": "out/report.json"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.mask, Some(PathBuf::from("mask.fits")));
        assert_eq!(cfg.flags, MaskFlags::SAT | MaskFlags::EDGE);
        assert_eq!(cfg.fill, Some(0.0));
        assert_eq!(cfg.output.report_json, Some(PathBuf::from("out/report.json")));
    }

    #[test]
    fn missing_output_is_an_error() {
        assert!(parse_config(r#"{ "input": "sci.fits" }"#).is_err());
    }
}
