//! Content node abstraction over the host scene graph.

use scrollkit_types::{Point, Size};

/// The scrollable child placed inside a scroll view's viewport.
///
/// Hosts implement this for their node type (or a handle to it). The scroll
/// view reads `size` whenever it needs bounds, so a node that grows or
/// shrinks is picked up on the next gesture or `update`.
pub trait ContentNode {
    /// Full extent of the scrollable content.
    fn size(&self) -> Size;

    /// Place the node relative to the viewport's minimum corner.
    fn set_position(&mut self, position: Point);
}

/// A plain sized node. Useful for hosts that mirror placement into their
/// own scene graph after each frame, and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteNode {
    pub name: String,
    pub size: Size,
    pub position: Point,
}

impl SpriteNode {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
            position: Point::ZERO,
        }
    }
}

impl ContentNode for SpriteNode {
    fn size(&self) -> Size {
        self.size
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

impl<T: ContentNode + ?Sized> ContentNode for Box<T> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn set_position(&mut self, position: Point) {
        (**self).set_position(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_node_starts_at_origin() {
        let n = SpriteNode::new("map", Size::new(640.0, 480.0));
        assert_eq!(n.name, "map");
        assert_eq!(n.position, Point::ZERO);
        assert_eq!(ContentNode::size(&n), Size::new(640.0, 480.0));
    }

    #[test]
    fn boxed_node_forwards() {
        let mut n: Box<dyn ContentNode> = Box::new(SpriteNode::new("a", Size::new(10.0, 20.0)));
        n.set_position(Point::new(-5.0, 3.0));
        assert_eq!(n.size(), Size::new(10.0, 20.0));
    }
}
