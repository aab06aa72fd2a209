//! Deck configuration, read from an inline JSON block in the page:
//!
//! ```html
//! <script type="application/json" id="slide-deck-config">{ "anim_ms": 500 }</script>
//! ```
//!
//! Every field is optional; a missing block means all defaults.

use serde::Deserialize;

use crate::error::Result;
use crate::nav::state::Timing;

pub const CONFIG_ELEMENT_ID: &str = "slide-deck-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavConfig {
    #[serde(default = "default_anim_ms")]
    pub anim_ms: u32,
    #[serde(default = "default_wheel_cooldown_ms")]
    pub wheel_cooldown_ms: u32,
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,
    #[serde(default = "default_wheel_idle_ms")]
    pub wheel_idle_ms: u32,
    #[serde(default = "default_breakpoint_px")]
    pub breakpoint_px: f64,
    #[serde(default = "default_swipe_min_px")]
    pub swipe_min_px: f64,
    #[serde(default = "default_swipe_max_ms")]
    pub swipe_max_ms: u32,
    #[serde(default = "default_preload_timeout_ms")]
    pub preload_timeout_ms: u32,
    #[serde(default = "default_loader_fade_ms")]
    pub loader_fade_ms: u32,
    #[serde(default = "default_roadmap_section")]
    pub roadmap_section: usize,
    #[serde(default = "default_jobs_section")]
    pub jobs_section: usize,
    #[serde(default = "default_jobs_items_per_group")]
    pub jobs_items_per_group: usize,
    /// Section selectors in document order.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    #[serde(default = "default_preload_images")]
    pub preload_images: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_anim_ms() -> u32 {
    400
}
fn default_wheel_cooldown_ms() -> u32 {
    500
}
fn default_wheel_threshold() -> f64 {
    50.0
}
fn default_wheel_idle_ms() -> u32 {
    50
}
fn default_breakpoint_px() -> f64 {
    900.0
}
fn default_swipe_min_px() -> f64 {
    50.0
}
fn default_swipe_max_ms() -> u32 {
    500
}
fn default_preload_timeout_ms() -> u32 {
    1500
}
fn default_loader_fade_ms() -> u32 {
    500
}
fn default_roadmap_section() -> usize {
    1
}
fn default_jobs_section() -> usize {
    3
}
fn default_jobs_items_per_group() -> usize {
    3
}
fn default_sections() -> Vec<String> {
    ["#hero", "#roadmap-container", "#clubs", "#jobs", "#destination"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_preload_images() -> Vec<String> {
    let mut images = vec!["logo.png".to_string()];
    images.extend((1..=4).map(|year| format!("year{year}.png")));
    images.extend((1..=12).map(|job| format!("job{job}.png")));
    images.extend(
        ["phimtruongLHU.jpg", "talab.png", "lhumedia.jpg"]
            .into_iter()
            .map(String::from),
    );
    images
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            anim_ms: default_anim_ms(),
            wheel_cooldown_ms: default_wheel_cooldown_ms(),
            wheel_threshold: default_wheel_threshold(),
            wheel_idle_ms: default_wheel_idle_ms(),
            breakpoint_px: default_breakpoint_px(),
            swipe_min_px: default_swipe_min_px(),
            swipe_max_ms: default_swipe_max_ms(),
            preload_timeout_ms: default_preload_timeout_ms(),
            loader_fade_ms: default_loader_fade_ms(),
            roadmap_section: default_roadmap_section(),
            jobs_section: default_jobs_section(),
            jobs_items_per_group: default_jobs_items_per_group(),
            sections: default_sections(),
            preload_images: default_preload_images(),
            log_level: default_log_level(),
        }
    }
}

impl NavConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the inline config block. A missing block yields defaults; a
    /// malformed one is reported and also yields defaults.
    pub fn load(document: &web_sys::Document) -> Self {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        Self::from_json_or_default(&text)
    }

    fn from_json_or_default(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            anim_ms: self.anim_ms as f64,
            wheel_cooldown_ms: self.wheel_cooldown_ms as f64,
            wheel_threshold: self.wheel_threshold,
            wheel_idle_ms: self.wheel_idle_ms as f64,
            swipe_min_px: self.swipe_min_px,
            swipe_max_ms: self.swipe_max_ms as f64,
            breakpoint_px: self.breakpoint_px,
        }
    }
}
