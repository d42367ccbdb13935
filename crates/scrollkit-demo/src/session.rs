//! Replays a [`Script`] against a scroll view on a simulated 60 fps clock.

use std::cell::Cell;
use std::rc::Rc;

use scrollkit_types::{Axis, PanGesture, Point, Result, ScrollConfig};
use scrollkit_ui::{ScrollPhase, ScrollView, ScrollViewDelegate, SpriteNode};

use crate::script::{Script, Step};

pub const FRAME: f64 = 1.0 / 60.0;

/// Frames `Settle` runs before giving up.
const SETTLE_LIMIT: usize = 600;

/// Logs delegate traffic and keeps a tally for the summary line.
#[derive(Default)]
pub struct LogDelegate {
    scrolls: Cell<usize>,
    drags: Cell<usize>,
    decelerations: Cell<usize>,
}

impl LogDelegate {
    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }

    pub fn drags(&self) -> usize {
        self.drags.get()
    }

    pub fn decelerations(&self) -> usize {
        self.decelerations.get()
    }
}

impl ScrollViewDelegate<SpriteNode> for LogDelegate {
    fn scroll_view_did_scroll(&self, scroll_view: &ScrollView<SpriteNode>) {
        self.scrolls.set(self.scrolls.get() + 1);
        let p = scroll_view.scroll_position();
        log::trace!("did scroll to ({:.1}, {:.1})", p.x, p.y);
    }

    fn scroll_view_will_begin_dragging(&self, _scroll_view: &ScrollView<SpriteNode>) {
        self.drags.set(self.drags.get() + 1);
        log::info!("will begin dragging");
    }

    fn scroll_view_did_end_dragging(&self, scroll_view: &ScrollView<SpriteNode>, decelerate: bool) {
        let p = scroll_view.scroll_position();
        log::info!(
            "did end dragging at ({:.1}, {:.1}), decelerate={decelerate}",
            p.x,
            p.y
        );
    }

    fn scroll_view_will_begin_decelerating(&self, scroll_view: &ScrollView<SpriteNode>) {
        let v = scroll_view.velocity();
        log::info!("will begin decelerating, velocity ({:.0}, {:.0})", v.x, v.y);
    }

    fn scroll_view_did_end_decelerating(&self, scroll_view: &ScrollView<SpriteNode>) {
        self.decelerations.set(self.decelerations.get() + 1);
        let p = scroll_view.scroll_position();
        log::info!(
            "did end decelerating at ({:.1}, {:.1}), page ({}, {})",
            p.x,
            p.y,
            scroll_view.horizontal_page(),
            scroll_view.vertical_page()
        );
    }
}

pub struct Session {
    view: ScrollView<SpriteNode>,
    delegate: Rc<LogDelegate>,
    time: f64,
}

impl Session {
    pub fn new(script: &Script, config: ScrollConfig) -> Result<Self> {
        let content = SpriteNode::new("content", script.view.content);
        let mut view = ScrollView::with_config(content, script.view.viewport, config)?;
        let delegate = Rc::new(LogDelegate::default());
        view.set_delegate(&delegate);
        view.update(0.0);
        Ok(Self {
            view,
            delegate,
            time: 0.0,
        })
    }

    pub fn view(&self) -> &ScrollView<SpriteNode> {
        &self.view
    }

    pub fn delegate(&self) -> &LogDelegate {
        &self.delegate
    }

    /// Simulated seconds elapsed.
    pub fn elapsed(&self) -> f64 {
        self.time
    }

    /// Run every step in order.
    pub fn run(&mut self, script: &Script) {
        for (i, step) in script.steps.iter().enumerate() {
            log::debug!("step {}: {step:?}", i + 1);
            self.apply(step);
        }
    }

    pub fn apply(&mut self, step: &Step) {
        match *step {
            Step::Drag {
                from,
                to,
                frames,
                hold_frames,
            } => self.drag(from, to, frames, hold_frames),
            Step::Tap { location } => {
                let halted = self.view.handle_tap(location);
                log::info!("tap at ({:.0}, {:.0}), halted={halted}", location.x, location.y);
            }
            Step::Page {
                axis,
                page,
                animated,
            } => match axis {
                Axis::Horizontal => self.view.set_horizontal_page(page, animated),
                Axis::Vertical => self.view.set_vertical_page(page, animated),
            },
            Step::ScrollTo { position, animated } => {
                self.view.set_scroll_position(position, animated);
            }
            Step::Paging { enabled } => self.view.set_paging_enabled(enabled),
            Step::Wait { frames } => self.frames(frames),
            Step::Settle => self.settle(),
        }
    }

    fn frame(&mut self) {
        self.time += FRAME;
        self.view.update(self.time);
    }

    fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    fn settle(&mut self) {
        let mut frames = 0;
        while self.view.phase() != ScrollPhase::Idle {
            if frames == SETTLE_LIMIT {
                log::warn!("view still {:?} after {frames} frames", self.view.phase());
                return;
            }
            self.frame();
            frames += 1;
        }
        log::debug!("settled after {frames} frames");
    }

    fn drag(&mut self, from: Point, to: Point, frames: usize, hold_frames: usize) {
        if !self.view.should_receive_touch(from) {
            log::info!("drag starts outside the view, ignored");
            return;
        }
        self.view.handle_pan(&PanGesture::Began {
            location: from,
            time: self.time,
        });
        for i in 1..=frames {
            self.frame();
            let t = i as f32 / frames as f32;
            self.view.handle_pan(&PanGesture::Changed {
                location: from + (to - from) * t,
                time: self.time,
            });
        }
        self.frames(hold_frames);
        self.view.handle_pan(&PanGesture::Ended {
            location: to,
            time: self.time,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DEFAULT_CONFIG, DEFAULT_SCRIPT};

    #[test]
    fn embedded_session_runs_to_rest() {
        let script = Script::from_toml(DEFAULT_SCRIPT).unwrap();
        let config = ScrollConfig::from_toml(DEFAULT_CONFIG).unwrap();
        let mut session = Session::new(&script, config).unwrap();
        session.run(&script);

        let view = session.view();
        assert_eq!(view.phase(), ScrollPhase::Idle);
        assert_eq!(view.scroll_position().y, 0.0);
        let x = view.scroll_position().x;
        assert!((0.0..=view.max_scroll_x()).contains(&x));
        assert_eq!(session.delegate().drags(), 4);
        assert!(session.delegate().scrolls() > 0);
        assert!(session.elapsed() > 1.0);
    }

    #[test]
    fn drag_outside_view_is_ignored() {
        let script = Script::from_toml(DEFAULT_SCRIPT).unwrap();
        let mut session = Session::new(&script, ScrollConfig::default()).unwrap();
        session.apply(&Step::Drag {
            from: Point::new(-10.0, 10.0),
            to: Point::new(-100.0, 10.0),
            frames: 3,
            hold_frames: 0,
        });
        assert_eq!(session.delegate().drags(), 0);
        assert_eq!(session.view().scroll_position(), Point::ZERO);
    }

    #[test]
    fn page_step_settles_on_page() {
        let script = Script::from_toml(DEFAULT_SCRIPT).unwrap();
        let mut session = Session::new(&script, ScrollConfig::default()).unwrap();
        session.apply(&Step::Page {
            axis: Axis::Horizontal,
            page: 2,
            animated: true,
        });
        session.apply(&Step::Settle);
        assert_eq!(session.view().scroll_position().x, 640.0);
        assert_eq!(session.view().horizontal_page(), 2);
        assert_eq!(session.delegate().decelerations(), 0);
    }
}
