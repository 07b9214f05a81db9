use crate::index::{IndexType, NodeIndex};

/// Node of the red-black tree
#[derive(Debug)]
pub struct Node<K, Ix> {
    /// Left child, or the sentinel
    pub left: NodeIndex<Ix>,
    /// Right child, or the sentinel
    pub right: NodeIndex<Ix>,
    /// Parent, or the sentinel for the root
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,

    /// Key and value; `None` only for the sentinel
    pub entry: Option<(K, String)>,
}

// Convenient getter/setter methods
impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(key, _)| key)
    }

    pub fn value(&self) -> Option<&str> {
        self.entry.as_ref().map(|(_, value)| value.as_str())
    }

    pub fn entry(&self) -> Option<(&K, &str)> {
        self.entry.as_ref().map(|(key, value)| (key, value.as_str()))
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn is_sentinel(&self) -> bool {
        self.entry.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn child(&self, side: Side) -> NodeIndex<Ix> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.color = color;
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.right = right;
        }
    }

    pub fn set_child(side: Side, child: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// Which child of its parent a node is.
///
/// Each mirrored fixup case is written once in terms of a `Side` and its
/// opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
