//! Gesture scripts: a TOML description of the view plus a list of steps
//! replayed against it at 60 fps.

use std::path::Path;

use serde::Deserialize;

use scrollkit_types::{Axis, Point, Result, ScrollError, Size};

/// The script compiled into the binary, used when no path is given.
pub const DEFAULT_SCRIPT: &str = include_str!("../scripts/demo.toml");

/// Scroll settings compiled into the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../scripts/scroll.toml");

/// Content and viewport dimensions for the session.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewSpec {
    pub content: Size,
    pub viewport: Size,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Pan from `from` to `to` over `frames` frames, optionally hold still
    /// for `hold_frames`, then lift.
    Drag {
        from: Point,
        to: Point,
        frames: usize,
        #[serde(default)]
        hold_frames: usize,
    },
    /// Tap at `location`.
    Tap { location: Point },
    /// Show a page on one axis.
    Page {
        axis: Axis,
        page: usize,
        #[serde(default = "default_animated")]
        animated: bool,
    },
    ScrollTo {
        position: Point,
        #[serde(default = "default_animated")]
        animated: bool,
    },
    Paging { enabled: bool },
    /// Advance the clock a fixed number of frames.
    Wait { frames: usize },
    /// Advance the clock until the view comes to rest.
    Settle,
}

fn default_animated() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub view: ViewSpec,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml(text: &str) -> Result<Self> {
        let script: Script = toml::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let script = Self::from_toml(&text)?;
        log::debug!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(ScrollError::Script("script has no steps".into()));
        }
        for (i, step) in self.steps.iter().enumerate() {
            if let Step::Drag { frames: 0, .. } = step {
                return Err(ScrollError::Script(format!(
                    "step {}: drag needs at least one frame",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_script_parses() {
        let script = Script::from_toml(DEFAULT_SCRIPT).unwrap();
        assert_eq!(script.view.viewport, Size::new(320.0, 240.0));
        assert!(script.steps.len() > 5);
    }

    #[test]
    fn step_defaults() {
        let script = Script::from_toml(
            r#"
            view = { content = { width = 100.0, height = 100.0 }, viewport = { width = 10.0, height = 10.0 } }

            [[steps]]
            action = "drag"
            from = { x = 5.0, y = 5.0 }
            to = { x = 1.0, y = 5.0 }
            frames = 2

            [[steps]]
            action = "page"
            axis = "vertical"
            page = 1
            "#,
        )
        .unwrap();
        assert_eq!(
            script.steps,
            vec![
                Step::Drag {
                    from: Point::new(5.0, 5.0),
                    to: Point::new(1.0, 5.0),
                    frames: 2,
                    hold_frames: 0,
                },
                Step::Page {
                    axis: Axis::Vertical,
                    page: 1,
                    animated: true,
                },
            ]
        );
    }

    #[test]
    fn rejects_zero_frame_drag() {
        let err = Script::from_toml(
            r#"
            view = { content = { width = 100.0, height = 100.0 }, viewport = { width = 10.0, height = 10.0 } }

            [[steps]]
            action = "drag"
            from = { x = 5.0, y = 5.0 }
            to = { x = 1.0, y = 5.0 }
            frames = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ScrollError::Script(_)));
    }

    #[test]
    fn rejects_empty_script() {
        let err = Script::from_toml(
            "steps = []\nview = { content = { width = 1.0, height = 1.0 }, viewport = { width = 1.0, height = 1.0 } }",
        )
        .unwrap_err();
        assert!(matches!(err, ScrollError::Script(_)));
    }

    #[test]
    fn unknown_action_is_parse_error() {
        let err = Script::from_toml(
            "view = { content = { width = 1.0, height = 1.0 }, viewport = { width = 1.0, height = 1.0 } }\n\
             [[steps]]\naction = \"zoom\"",
        )
        .unwrap_err();
        assert!(matches!(err, ScrollError::TomlParse(_)));
    }
}
