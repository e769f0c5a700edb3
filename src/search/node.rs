use std::ops::Index;

use crate::data::Action;
use crate::state::State;

/// Stable handle into a `NodeArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct Node {
    pub state: State,
    pub parent: Option<NodeId>,
    /// The action that produced this state from its parent - absent only
    /// on the root.
    pub action: Option<Action>,
    pub path_len: u32,
}

/// The whole state graph of one search.
///
/// Parent links are indices instead of references so frontier, explored set
/// and all ancestors are freed in one step when the arena is dropped.
/// Children can only be created through `insert_child`, which is what keeps
/// every parent chain coherent.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert_root(&mut self, state: State) -> NodeId {
        self.insert(Node {
            state,
            parent: None,
            action: None,
            path_len: 0,
        })
    }

    pub fn insert_child(&mut self, parent: NodeId, action: Action, state: State) -> NodeId {
        let path_len = self[parent].path_len + 1;
        self.insert(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            path_len,
        })
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Actions from the root to `id`, in execution order.
    pub fn extract_plan(&self, id: NodeId) -> Vec<Action> {
        let mut plan = Vec::new();
        let mut cur = &self[id];
        while let Some(parent) = cur.parent {
            // non-root nodes always carry the action that created them
            plan.push(cur.action.unwrap());
            cur = &self[parent];
        }
        plan.reverse();
        debug_assert_eq!(plan.len() as u32, self[id].path_len);
        plan
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
