//! Drag scripts
//!
//! A script describes one container and a list of steps to replay against
//! it:
//!
//! ```toml
//! [container]
//! width = 600.0
//! height = 600.0
//! content_height = 2400.0
//! scroll_top = 500.0
//!
//! [[steps]]
//! action = "drag_start"
//!
//! [[steps]]
//! action = "move"
//! x = 300.0
//! y = 10.0
//!
//! [[steps]]
//! action = "frames"
//! count = 10
//! ```

use anyhow::{Context, Result};
use scrollzone::ScrollzoneConfig;
use scrollzone_platform::Rect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A complete simulation script
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Script {
    #[serde(default)]
    pub container: ContainerSpec,
    /// Inline controller configuration; `--config` takes precedence
    #[serde(default)]
    pub config: Option<ScrollzoneConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Load a script from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let script: Script = toml::from_str(content)?;
        if let Some(config) = &script.config {
            config.validate()?;
        }
        Ok(script)
    }
}

/// The simulated scroll container
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub scroll_left: f32,
    pub scroll_top: f32,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 600.0,
            height: 600.0,
            content_width: 600.0,
            content_height: 2400.0,
            scroll_left: 0.0,
            scroll_top: 0.0,
        }
    }
}

impl ContainerSpec {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Input device behind a `move` step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSource {
    /// HTML5 `dragover`
    #[default]
    Drag,
    Mouse,
    Touch,
}

/// One scripted step
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// The drag monitor reports a drag
    DragStart,
    /// The drag monitor reports the drag is over
    DragEnd,
    /// Pointer moved to `(x, y)` in client coordinates
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        source: MoveSource,
    },
    /// Run `count` display frames, `ms` apart (one 60 Hz frame by default)
    Frames {
        count: usize,
        #[serde(default)]
        ms: Option<u64>,
    },
    /// Let time pass without running frames
    Wait { ms: u64 },
    /// Item dropped
    Drop,
}
