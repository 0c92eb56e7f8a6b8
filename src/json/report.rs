//! Solution report output.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::Solution;

/// The caller-facing view of a solution.
///
/// Serializes to a JSON object with one key per vehicle index holding its
/// node sequence, plus `droppedNodes` and `time` when applicable:
///
/// ```json
/// { "0": [0, 3, 1, 0], "1": [0, 2, 0], "droppedNodes": [4], "time": { "0": [540, 561, 590, 612], "1": [540, 560, 580] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionReport {
    /// Node sequence per vehicle, start and end included.
    pub routes: Vec<Vec<usize>>,
    /// Present when the time dimension is active or stops were optional.
    pub dropped_nodes: Option<Vec<usize>>,
    /// Cumulative time at every node, present when the time dimension is active.
    pub time: Option<Vec<Vec<i64>>>,
}

impl SolutionReport {
    pub fn from_solution(solution: &Solution) -> Self {
        let routes = solution.routes().iter().map(|r| r.node_ids()).collect();
        let dropped_nodes = (solution.time_active() || solution.drops_allowed())
            .then(|| solution.dropped().to_vec());
        let time = solution.time_active().then(|| {
            solution
                .routes()
                .iter()
                .map(|r| r.times().unwrap_or_default())
                .collect()
        });
        Self {
            routes,
            dropped_nodes,
            time,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<&Solution> for SolutionReport {
    fn from(solution: &Solution) -> Self {
        Self::from_solution(solution)
    }
}

/// A slice serialized as a map keyed by decimal position.
struct IndexedMap<'a, T>(&'a [T]);

impl<T: Serialize> Serialize for IndexedMap<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, value) in self.0.iter().enumerate() {
            map.serialize_entry(&i.to_string(), value)?;
        }
        map.end()
    }
}

impl Serialize for SolutionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.routes.len()
            + usize::from(self.dropped_nodes.is_some())
            + usize::from(self.time.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (vehicle, route) in self.routes.iter().enumerate() {
            map.serialize_entry(&vehicle.to_string(), route)?;
        }
        if let Some(dropped) = &self.dropped_nodes {
            map.serialize_entry("droppedNodes", dropped)?;
        }
        if let Some(time) = &self.time {
            map.serialize_entry("time", &IndexedMap(time))?;
        }
        map.end()
    }
}
