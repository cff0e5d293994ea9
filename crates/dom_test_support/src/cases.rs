//! Caret stepping cases stored as TOML or JSON manifests.
//!
//! ```toml
//! format = "caret-steps-v1"
//!
//! [[cases]]
//! id = "next-enters-bold"
//! markup = "<span>test <b>test</b></span>"
//! start = { path = [0], offset = 5 }
//! direction = "next"
//! text = { path = [1, 0], offset = 0 }
//! no_text = { path = [1], offset = 0 }
//! ```
//!
//! `bound` defaults to the root (`[]`). A missing `text` / `no_text` entry
//! means the step is expected to return `None` in that mode.

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CARET_STEPS_FORMAT_V1: &str = "caret-steps-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StepManifest {
    pub format: String,
    pub cases: Vec<StepCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StepCase {
    pub id: String,
    pub markup: String,
    #[serde(default)]
    pub bound: Vec<usize>,
    pub start: PathCaret,
    pub direction: Direction,
    #[serde(default)]
    pub text: Option<PathCaret>,
    #[serde(default)]
    pub no_text: Option<PathCaret>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PathCaret {
    pub path: Vec<usize>,
    pub offset: usize,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Load a manifest, choosing the format from the file extension.
pub fn load_step_cases(path: &Path) -> StepManifest {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read step cases {path:?}: {err}"));
    let manifest: StepManifest = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse step cases TOML {path:?}: {err}")),
        Some("json") => serde_json::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse step cases JSON {path:?}: {err}")),
        other => panic!("unsupported step case extension {other:?} for {path:?}"),
    };
    validate(&manifest, path);
    manifest
}

fn validate(manifest: &StepManifest, path: &Path) {
    assert_eq!(
        manifest.format, CARET_STEPS_FORMAT_V1,
        "unsupported format in {path:?}"
    );
    assert!(!manifest.cases.is_empty(), "{path:?} has no cases");
    let mut seen = std::collections::BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate case id '{}' in {path:?}",
            case.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_cases() {
        let manifest: StepManifest = toml::from_str(
            r#"
            format = "caret-steps-v1"

            [[cases]]
            id = "a"
            markup = "<p>ab</p>"
            start = { path = [0], offset = 0 }
            direction = "prev"
            "#,
        )
        .unwrap();
        let case = &manifest.cases[0];
        assert_eq!(case.direction, Direction::Prev);
        assert!(case.bound.is_empty());
        assert_eq!(case.text, None);
        validate(&manifest, Path::new("inline.toml"));
    }

    #[test]
    fn json_matches_toml_shape() {
        let manifest: StepManifest = serde_json::from_str(
            r#"{"format": "caret-steps-v1", "cases": [{
                "id": "b", "markup": "<p/>", "bound": [],
                "start": {"path": [], "offset": 0}, "direction": "next",
                "text": null, "no_text": null
            }]}"#,
        )
        .unwrap();
        assert_eq!(manifest.cases[0].direction, Direction::Next);
    }
}
