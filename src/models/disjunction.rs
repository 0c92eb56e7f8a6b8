//! Optional stops and the penalty paid for leaving them out.

use super::Registry;

/// Per-node drop penalties. A node without a penalty is mandatory.
///
/// Every disjunction here is a singleton: one node, one penalty.
///
/// # Examples
///
/// ```
/// use shift_routing::models::{Disjunctions, Registry};
///
/// let registry = Registry::with_index_ids(4, 1, &[0], &[0]).unwrap();
/// let d = Disjunctions::for_stops(&registry, 100_000.0);
/// assert!(!d.is_optional(0)); // depot
/// assert_eq!(d.penalty(2), Some(100_000.0));
/// ```
#[derive(Debug, Clone)]
pub struct Disjunctions {
    penalties: Vec<Option<f64>>,
}

impl Disjunctions {
    /// Every node mandatory.
    pub fn none(num_nodes: usize) -> Self {
        Self {
            penalties: vec![None; num_nodes],
        }
    }

    /// One disjunction per stop (every node that is no vehicle's start or end).
    pub fn for_stops(registry: &Registry, penalty: f64) -> Self {
        let mut d = Self::none(registry.num_nodes());
        for stop in registry.stops() {
            d.add(stop, penalty);
        }
        d
    }

    /// Makes `node` optional at the given penalty.
    pub fn add(&mut self, node: usize, penalty: f64) {
        self.penalties[node] = Some(penalty);
    }

    /// Drop penalty of `node`, `None` when mandatory.
    pub fn penalty(&self, node: usize) -> Option<f64> {
        self.penalties[node]
    }

    pub fn is_optional(&self, node: usize) -> bool {
        self.penalties[node].is_some()
    }

    /// Returns `true` if at least one node may be dropped.
    pub fn any(&self) -> bool {
        self.penalties.iter().any(Option::is_some)
    }

    /// Sum of penalties for the given dropped nodes.
    ///
    /// Mandatory nodes contribute nothing; callers never drop them.
    pub fn total_penalty(&self, dropped: &[usize]) -> f64 {
        dropped.iter().filter_map(|&n| self.penalties[n]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_all_mandatory() {
        let d = Disjunctions::none(3);
        assert!(!d.any());
        assert!(!d.is_optional(1));
        assert_eq!(d.total_penalty(&[1, 2]), 0.0);
    }

    #[test]
    fn test_for_stops_skips_depots() {
        let r = Registry::with_index_ids(5, 2, &[0, 1], &[0, 4]).expect("valid");
        let d = Disjunctions::for_stops(&r, 50.0);
        assert!(d.any());
        assert_eq!(
            (0..5).map(|n| d.is_optional(n)).collect::<Vec<_>>(),
            vec![false, false, true, true, false]
        );
        assert_eq!(d.total_penalty(&[2, 3]), 100.0);
    }
}
