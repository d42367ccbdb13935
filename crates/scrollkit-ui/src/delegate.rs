//! Delegate protocol for scroll view lifecycle notifications.
//!
//! Every method has a no-op default, so an observer implements only the
//! callbacks it cares about. The scroll view holds its delegate through a
//! `Weak` and never keeps it alive.

use crate::node::ContentNode;
use crate::scroll_view::ScrollView;

/// Observer of a [`ScrollView`]. Methods take `&self`; implementors that
/// need to record state use interior mutability.
pub trait ScrollViewDelegate<N: ContentNode> {
    /// The scroll position changed.
    fn scroll_view_did_scroll(&self, _scroll_view: &ScrollView<N>) {}

    /// A drag gesture is about to move the content.
    fn scroll_view_will_begin_dragging(&self, _scroll_view: &ScrollView<N>) {}

    /// The finger lifted. `decelerate` is true when inertial motion, a
    /// bounce back, or a page snap follows.
    fn scroll_view_did_end_dragging(&self, _scroll_view: &ScrollView<N>, _decelerate: bool) {}

    fn scroll_view_will_begin_decelerating(&self, _scroll_view: &ScrollView<N>) {}

    /// Post-release motion came to rest.
    fn scroll_view_did_end_decelerating(&self, _scroll_view: &ScrollView<N>) {}
}
