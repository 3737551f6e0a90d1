/// A partial decision state in the best-first search. `level` counts the
/// ratio-ordered items already decided (0 at the root); `taken` records the
/// include decisions as a bitmask over ratio-ordered positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub level: usize,
    pub weight: u32,
    pub value: f64,
    pub bound: f64,
    pub taken: u128,
}

/// Binary max-heap over search nodes keyed by bound, backed by a growable
/// vector so pushes are amortized O(1) and nothing is lost on growth.
#[derive(Debug, Default)]
pub struct NodeQueue {
    nodes: Vec<SearchNode>,
}

impl NodeQueue {
    pub fn new() -> NodeQueue {
        NodeQueue { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeQueue {
        NodeQueue {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn peek(&self) -> Option<&SearchNode> {
        self.nodes.first()
    }

    pub fn push(&mut self, node: SearchNode) {
        self.nodes.push(node);
        self.sift_up(self.nodes.len() - 1);
    }

    /// Removes and returns the node with the highest bound.
    pub fn pop(&mut self) -> Option<SearchNode> {
        if self.nodes.is_empty() {
            return None;
        }
        let node = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some(node)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.nodes[i].bound <= self.nodes[parent].bound {
                break;
            }
            self.nodes.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut largest = i;
            if left < len && self.nodes[left].bound > self.nodes[largest].bound {
                largest = left;
            }
            if right < len && self.nodes[right].bound > self.nodes[largest].bound {
                largest = right;
            }
            if largest == i {
                break;
            }
            self.nodes.swap(i, largest);
            i = largest;
        }
    }
}
