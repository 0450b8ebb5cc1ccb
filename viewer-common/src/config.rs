//! Viewer configuration passed from the page to the `FrameViewer` constructor.

use serde::Deserialize;

use crate::{bail, Result};

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8765";
pub const DEFAULT_OUTPUT_ELEMENT_ID: &str = "game-board";
pub const DEFAULT_START_ELEMENT_ID: &str = "start-button";

/// Settings for a single frame viewer. Every field is optional on the JS
/// side; missing keys fall back to the values the page was written against.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewerConfig {
    pub endpoint: String,
    pub output_element_id: String,
    pub start_element_id: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_element_id: DEFAULT_OUTPUT_ELEMENT_ID.to_string(),
            start_element_id: DEFAULT_START_ELEMENT_ID.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        let scheme = match self.endpoint.split_once("://") {
            Some((scheme, rest)) if !rest.is_empty() => scheme,
            _ => bail!("endpoint '{}' is not a URL", self.endpoint),
        };
        if !scheme.eq_ignore_ascii_case("ws") && !scheme.eq_ignore_ascii_case("wss") {
            bail!(
                "endpoint '{}' must use the ws or wss scheme, got '{}'",
                self.endpoint,
                scheme
            );
        }
        if self.output_element_id.is_empty() {
            bail!("output element id must not be empty");
        }
        if self.start_element_id.is_empty() {
            bail!("start element id must not be empty");
        }
        Ok(())
    }
}
