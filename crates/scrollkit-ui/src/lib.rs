//! scrollkit-ui: a scroll view widget for 2D scene-graph hosts.
//!
//! The host owns the frame clock and the gesture recognizer. It forwards pan
//! events to [`ScrollView::handle_pan`], calls [`ScrollView::update`] once
//! per frame, and the widget positions its [`ContentNode`] accordingly.
//! Observers register through [`ScrollViewDelegate`].

pub mod animation;
pub mod delegate;
pub mod node;
pub mod paging;
pub mod physics;
pub mod scroll_view;

#[cfg(test)]
pub(crate) mod test_utils;

pub use delegate::ScrollViewDelegate;
pub use node::{ContentNode, SpriteNode};
pub use scroll_view::{ScrollPhase, ScrollView};
pub use scrollkit_types::{
    Axis, PanGesture, PhysicsConfig, Point, Rect, Result, ScrollConfig, ScrollError, ScrollFlags,
    Size,
};
