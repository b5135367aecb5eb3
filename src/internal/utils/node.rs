use core::{
    fmt::{self, Debug},
    ops::{Index, IndexMut},
};

/// Stable handle of a node inside a [NodeArena].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(pub(crate) usize);

/// The pair of neighbours a node has at one level.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Link {
    pub(crate) prev: NodeId,
    pub(crate) next: NodeId,
}

pub(crate) struct Node {
    pub(crate) value: i64,
    pub(crate) levels: Vec<Link>,
}

impl Node {
    /// Builds a node taking part in levels `0..=level`, every slot set to `link`.
    pub(crate) fn new(value: i64, level: usize, link: Link) -> Self {
        Node {
            value,
            levels: vec![link; level + 1],
        }
    }

    /// Number of levels the node takes part in.
    pub(crate) fn height(&self) -> usize {
        self.levels.len()
    }

    /// Highest level index the node takes part in.
    pub(crate) fn top_level(&self) -> usize {
        self.height() - 1
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("height", &self.height())
            .field(
                "levels",
                &self
                    .levels
                    .iter()
                    .fold(String::new(), |acc, link| {
                        format!("{}{}<>{}, ", acc, link.prev.0, link.next.0)
                    }),
            )
            .finish()
    }
}

/// Dense storage for every node of a list, sentinels included.
///
/// Released slots are parked on a free list and handed out again by the next
/// allocation, so a [NodeId] stays valid for as long as its node is linked.
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    free_list: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        NodeArena {
            nodes: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.nodes[id.0] = node;
            id
        } else {
            let id = NodeId(self.nodes.len());
            self.nodes.push(node);
            id
        }
    }

    /// Returns the slot to the free list. The node must already be unlinked.
    pub(crate) fn release(&mut self, id: NodeId) {
        self.nodes[id.0].levels = Vec::new();
        self.free_list.push(id);
    }

    /// Drops every node allocated after the first `keep` slots.
    pub(crate) fn truncate(&mut self, keep: usize) {
        self.nodes.truncate(keep);
        self.free_list.clear();
    }

    /// Slots currently holding a node, sentinels included.
    pub(crate) fn occupied(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    pub(crate) fn next(&self, id: NodeId, level: usize) -> NodeId {
        self.nodes[id.0].levels[level].next
    }

    pub(crate) fn prev(&self, id: NodeId, level: usize) -> NodeId {
        self.nodes[id.0].levels[level].prev
    }

    pub(crate) fn set_next(&mut self, id: NodeId, level: usize, next: NodeId) {
        self.nodes[id.0].levels[level].next = next;
    }

    pub(crate) fn set_prev(&mut self, id: NodeId, level: usize, prev: NodeId) {
        self.nodes[id.0].levels[level].prev = prev;
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod node_test {
    use super::*;

    fn dangling() -> Link {
        Link {
            prev: NodeId(0),
            next: NodeId(0),
        }
    }

    #[test]
    fn test_new_node() {
        let node = Node::new(3, 4, dangling());

        assert_eq!(node.value, 3);
        assert_eq!(node.height(), 5);
        assert_eq!(node.top_level(), 4);
        assert!(node.levels.iter().all(|link| *link == dangling()));

        println!("node: {:?}", node);
    }

    #[test]
    fn test_arena_recycles_slots() {
        let mut arena = NodeArena::new();

        let a = arena.alloc(Node::new(1, 0, dangling()));
        let b = arena.alloc(Node::new(2, 1, dangling()));
        assert_eq!((a, b), (NodeId(0), NodeId(1)));
        assert_eq!(arena.occupied(), 2);

        arena.release(a);
        assert_eq!(arena.occupied(), 1);
        assert_eq!(arena[a].height(), 0);

        let c = arena.alloc(Node::new(3, 2, dangling()));
        assert_eq!(c, a);
        assert_eq!(arena[c].value, 3);
        assert_eq!(arena[c].height(), 3);
        assert_eq!(arena.occupied(), 2);
    }

    #[test]
    fn test_arena_links() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new(1, 1, dangling()));
        let b = arena.alloc(Node::new(2, 1, dangling()));

        arena.set_next(a, 1, b);
        arena.set_prev(b, 1, a);

        assert_eq!(arena.next(a, 1), b);
        assert_eq!(arena.prev(b, 1), a);
        assert_eq!(arena.next(a, 0), NodeId(0));

        arena.truncate(1);
        assert_eq!(arena.occupied(), 1);
    }
}
