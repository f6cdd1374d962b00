//! The free-space tree used by the binary tree packer.
//!
//! Every node covers a rectangle of the sheet. Leaves are free space; internal
//! nodes are fully used and own exactly two children, `right` and `down`,
//! that tile whatever is left of the node after its top-left corner was
//! handed out. Nodes live in an arena owned by a single tree and refer to
//! each other by [`NodeId`].

use crate::geometry::{Rect, Vector2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy)]
struct Children {
    right: NodeId,
    down: NodeId,
}

#[derive(Debug, Clone)]
pub struct Node {
    rect: Rect,
    children: Option<Children>,
}

impl Node {
    fn free(rect: Rect) -> Self {
        Self {
            rect,
            children: None,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// A node is used once it has been split. Used nodes always have both
    /// children.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.children.is_some()
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|children| children.right)
    }

    #[inline]
    pub fn down(&self) -> Option<NodeId> {
        self.children.map(|children| children.down)
    }
}

#[derive(Debug, Clone)]
pub struct FreeSpaceTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl FreeSpaceTree {
    /// Creates a tree made of a single free rectangle at the origin.
    pub fn new<S: Into<Vector2>>(size: S) -> Self {
        Self {
            nodes: vec![Node::free(Rect::new(Vector2::zero(), size))],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The size of the whole area covered by the tree.
    #[inline]
    pub fn size(&self) -> Vector2 {
        self.node(self.root).rect.size
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Finds a free leaf that can hold a rectangle of `size`.
    ///
    /// The search is depth-first and always visits `right` before `down`, so
    /// the same tree and request produce the same leaf every time.
    pub fn find_space(&self, size: Vector2) -> Option<NodeId> {
        let mut to_visit = vec![self.root];

        while let Some(id) = to_visit.pop() {
            let node = self.node(id);

            match node.children {
                Some(children) => {
                    // Popped in reverse order of pushing.
                    to_visit.push(children.down);
                    to_visit.push(children.right);
                }
                None => {
                    if size.fits_in(node.rect.size) {
                        return Some(id);
                    }
                }
            }
        }

        None
    }

    /// Marks the leaf `id` as used by a rectangle of size `used` anchored at
    /// its top-left corner, and splits the remaining space in two new leaves.
    ///
    /// Returns the new `(right, down)` leaves.
    ///
    /// ## Panics
    /// Panics if `id` was already split or if `used` doesn't fit in it.
    pub fn split(&mut self, id: NodeId, used: Vector2) -> (NodeId, NodeId) {
        let rect = self.node(id).rect;

        assert!(
            !self.node(id).is_used(),
            "cannot split a node that is already used"
        );
        assert!(
            used.fits_in(rect.size),
            "cannot split a {} node to hold {}",
            rect.size,
            used
        );

        let right = self.push(Rect::new(
            (rect.pos.x + used.x, rect.pos.y),
            (rect.size.x - used.x, used.y),
        ));
        let down = self.push(Rect::new(
            (rect.pos.x, rect.pos.y + used.y),
            (rect.size.x, rect.size.y - used.y),
        ));

        self.nodes[id.0].children = Some(Children { right, down });

        (right, down)
    }

    /// Grows the tree downwards by `amount`, keeping its width.
    ///
    /// The old root becomes the `right` child of a new, larger root. Returns
    /// the new free leaf covering the added strip, or `None` without touching
    /// the tree if the new height doesn't fit in a `u32`.
    pub fn extend_below(&mut self, amount: u32) -> Option<NodeId> {
        let size = self.size();
        let height = size.y.checked_add(amount)?;

        let old_root = self.root;
        let strip = self.push(Rect::new((0, size.y), (size.x, amount)));

        self.replace_root(
            (size.x, height),
            Children {
                right: old_root,
                down: strip,
            },
        );

        Some(strip)
    }

    /// Grows the tree to the right by `amount`, keeping its height.
    ///
    /// The old root becomes the `down` child of a new, larger root. Returns
    /// the new free leaf covering the added strip, or `None` without touching
    /// the tree if the new width doesn't fit in a `u32`.
    pub fn extend_right(&mut self, amount: u32) -> Option<NodeId> {
        let size = self.size();
        let width = size.x.checked_add(amount)?;

        let old_root = self.root;
        let strip = self.push(Rect::new((size.x, 0), (amount, size.y)));

        self.replace_root(
            (width, size.y),
            Children {
                right: strip,
                down: old_root,
            },
        );

        Some(strip)
    }

    /// All free rectangles in the tree, degenerate ones included, in search
    /// order.
    pub fn leaves(&self) -> impl Iterator<Item = Rect> + '_ {
        let mut to_visit = vec![self.root];

        std::iter::from_fn(move || {
            while let Some(id) = to_visit.pop() {
                let node = self.node(id);

                match node.children {
                    Some(children) => {
                        to_visit.push(children.down);
                        to_visit.push(children.right);
                    }
                    None => return Some(node.rect),
                }
            }

            None
        })
    }

    fn push(&mut self, rect: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::free(rect));
        id
    }

    fn replace_root<S: Into<Vector2>>(&mut self, size: S, children: Children) {
        let id = self.push(Rect::new(Vector2::zero(), size));
        self.nodes[id.0].children = Some(children);
        self.root = id;
    }
}
