//! Shared test utilities for scrollkit-ui tests.
//!
//! Provides a [`RecordingDelegate`] that records every callback for
//! assertion, plus helpers that drive a scroll view with simulated gestures
//! and a 60 fps clock.

use std::cell::RefCell;

use scrollkit_types::{PanGesture, Point, Size};

use crate::delegate::ScrollViewDelegate;
use crate::node::SpriteNode;
use crate::scroll_view::{ScrollPhase, ScrollView};

pub const FRAME: f64 = 1.0 / 60.0;

/// A recorded delegate callback.
#[derive(Debug, Clone, PartialEq)]
pub enum DelegateEvent {
    DidScroll(Point),
    WillBeginDragging,
    DidEndDragging { decelerate: bool },
    WillBeginDecelerating,
    DidEndDecelerating,
}

/// A delegate that records all callbacks for test assertions.
#[derive(Default)]
pub struct RecordingDelegate {
    pub events: RefCell<Vec<DelegateEvent>>,
    /// `(horizontal, vertical)` page indices read inside each `did_scroll`.
    pub scroll_pages: RefCell<Vec<(usize, usize)>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DelegateEvent> {
        self.events.borrow().clone()
    }

    /// Events other than `DidScroll`, in order.
    pub fn lifecycle(&self) -> Vec<DelegateEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| !matches!(e, DelegateEvent::DidScroll(_)))
            .cloned()
            .collect()
    }

    pub fn scroll_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, DelegateEvent::DidScroll(_)))
            .count()
    }

    pub fn count(&self, event: &DelegateEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn last_scroll_pages(&self) -> Option<(usize, usize)> {
        self.scroll_pages.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        self.scroll_pages.borrow_mut().clear();
    }

    fn push(&self, event: DelegateEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl ScrollViewDelegate<SpriteNode> for RecordingDelegate {
    fn scroll_view_did_scroll(&self, scroll_view: &ScrollView<SpriteNode>) {
        self.push(DelegateEvent::DidScroll(scroll_view.scroll_position()));
        self.scroll_pages
            .borrow_mut()
            .push((scroll_view.horizontal_page(), scroll_view.vertical_page()));
    }

    fn scroll_view_will_begin_dragging(&self, _scroll_view: &ScrollView<SpriteNode>) {
        self.push(DelegateEvent::WillBeginDragging);
    }

    fn scroll_view_did_end_dragging(
        &self,
        _scroll_view: &ScrollView<SpriteNode>,
        decelerate: bool,
    ) {
        self.push(DelegateEvent::DidEndDragging { decelerate });
    }

    fn scroll_view_will_begin_decelerating(&self, _scroll_view: &ScrollView<SpriteNode>) {
        self.push(DelegateEvent::WillBeginDecelerating);
    }

    fn scroll_view_did_end_decelerating(&self, _scroll_view: &ScrollView<SpriteNode>) {
        self.push(DelegateEvent::DidEndDecelerating);
    }
}

/// A scroll view over a plain sprite of `content` size.
pub fn view(content: Size, viewport: Size) -> ScrollView<SpriteNode> {
    ScrollView::new(SpriteNode::new("content", content), viewport).unwrap()
}

/// Simulated host: a clock plus gesture helpers.
pub struct Host {
    pub time: f64,
}

impl Host {
    pub fn new(view: &mut ScrollView<SpriteNode>) -> Self {
        view.update(0.0);
        Self { time: 0.0 }
    }

    /// Advance one frame.
    pub fn frame(&mut self, view: &mut ScrollView<SpriteNode>) {
        self.time += FRAME;
        view.update(self.time);
    }

    pub fn frames(&mut self, view: &mut ScrollView<SpriteNode>, n: usize) {
        for _ in 0..n {
            self.frame(view);
        }
    }

    /// Run frames until the view is idle. Panics after ten simulated seconds.
    pub fn settle(&mut self, view: &mut ScrollView<SpriteNode>) -> usize {
        for frame in 0..600 {
            if view.phase() == ScrollPhase::Idle {
                return frame;
            }
            self.frame(view);
        }
        panic!("scroll view did not settle (phase {:?})", view.phase());
    }

    /// Drag the finger from `from` to `to` in `steps` moves, one frame
    /// apart, without lifting.
    pub fn drag(
        &mut self,
        view: &mut ScrollView<SpriteNode>,
        from: Point,
        to: Point,
        steps: usize,
    ) {
        view.handle_pan(&PanGesture::Began {
            location: from,
            time: self.time,
        });
        for i in 1..=steps {
            self.frame(view);
            let t = i as f32 / steps as f32;
            let location = from + (to - from) * t;
            view.handle_pan(&PanGesture::Changed {
                location,
                time: self.time,
            });
        }
    }

    /// Lift the finger where it currently is.
    pub fn lift(&mut self, view: &mut ScrollView<SpriteNode>, at: Point) {
        view.handle_pan(&PanGesture::Ended {
            location: at,
            time: self.time,
        });
    }

    /// Drag then lift immediately.
    pub fn swipe(
        &mut self,
        view: &mut ScrollView<SpriteNode>,
        from: Point,
        to: Point,
        steps: usize,
    ) {
        self.drag(view, from, to, steps);
        self.lift(view, to);
    }
}
