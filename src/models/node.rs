//! Node type: a stop or a vehicle depot.

/// A location in the routing graph.
///
/// Nodes are indexed `0..N` in the same order as the cost matrix. Depot
/// nodes (vehicle starts and ends) are never routed as stops.
///
/// # Examples
///
/// ```
/// use shift_routing::models::Node;
///
/// let n = Node::new(3, "warehouse-7").with_demand(12);
/// assert_eq!(n.index(), 3);
/// assert_eq!(n.external_id(), "warehouse-7");
/// assert_eq!(n.demand(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    index: usize,
    external_id: String,
    demand: i64,
}

impl Node {
    /// Creates a node with zero demand.
    pub fn new(index: usize, external_id: impl Into<String>) -> Self {
        Self {
            index,
            external_id: external_id.into(),
            demand: 0,
        }
    }

    /// Sets the demand picked up at this node.
    pub fn with_demand(mut self, demand: i64) -> Self {
        self.demand = demand;
        self
    }

    /// Internal index (row/column in the cost matrix).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Caller-supplied identifier.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Demand at this node; zero when no demands were declared.
    pub fn demand(&self) -> i64 {
        self.demand
    }
}
