//! Node/vehicle registry: external identifiers to internal indices.

use std::collections::HashMap;

use super::{Node, ShiftWindow, Vehicle};
use crate::error::ConfigurationError;

/// Bijection between caller identifiers and the compact index space
/// `0..N` (nodes) and `0..V` (vehicles), plus each vehicle's start/end.
///
/// Every node that is some vehicle's start or end is a depot; all other
/// nodes are stops.
///
/// # Examples
///
/// ```
/// use shift_routing::models::Registry;
///
/// let registry = Registry::with_index_ids(5, 2, &[0, 1], &[0, 1]).unwrap();
/// assert_eq!(registry.num_nodes(), 5);
/// assert_eq!(registry.stops().collect::<Vec<_>>(), vec![2, 3, 4]);
/// assert_eq!(registry.node_index("3"), Some(3));
/// assert_eq!(registry.vehicle(1).start(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    nodes: Vec<Node>,
    vehicles: Vec<Vehicle>,
    node_lookup: HashMap<String, usize>,
    vehicle_lookup: HashMap<String, usize>,
    depot: Vec<bool>,
}

impl Registry {
    /// Builds a registry from explicit identifiers.
    ///
    /// `starts` and `ends` must each hold one in-range node index per vehicle.
    pub fn new(
        node_ids: Vec<String>,
        vehicle_ids: Vec<String>,
        starts: &[usize],
        ends: &[usize],
    ) -> Result<Self, ConfigurationError> {
        let num_nodes = node_ids.len();
        let num_vehicles = vehicle_ids.len();
        if num_vehicles == 0 {
            return Err(ConfigurationError::NoVehicles);
        }
        check_endpoints("starts", starts, num_vehicles, num_nodes)?;
        check_endpoints("ends", ends, num_vehicles, num_nodes)?;

        let node_lookup = index_ids("node_ids", &node_ids)?;
        let vehicle_lookup = index_ids("vehicle_ids", &vehicle_ids)?;

        let nodes = node_ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| Node::new(i, id))
            .collect();

        let mut depot = vec![false; num_nodes];
        let vehicles = vehicle_ids
            .into_iter()
            .enumerate()
            .map(|(v, id)| {
                depot[starts[v]] = true;
                depot[ends[v]] = true;
                Vehicle::new(v, starts[v], ends[v]).with_external_id(id)
            })
            .collect();

        Ok(Self {
            nodes,
            vehicles,
            node_lookup,
            vehicle_lookup,
            depot,
        })
    }

    /// Builds a registry whose identifiers are the decimal indices.
    pub fn with_index_ids(
        num_nodes: usize,
        num_vehicles: usize,
        starts: &[usize],
        ends: &[usize],
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            (0..num_nodes).map(|i| i.to_string()).collect(),
            (0..num_vehicles).map(|v| v.to_string()).collect(),
            starts,
            ends,
        )
    }

    /// Attaches one demand per node.
    pub fn set_demands(&mut self, demands: &[i64]) -> Result<(), ConfigurationError> {
        expect_len("demands", demands.len(), self.nodes.len())?;
        for (position, (node, &demand)) in self.nodes.iter_mut().zip(demands).enumerate() {
            if demand < 0 {
                return Err(ConfigurationError::Negative {
                    field: "demands",
                    position,
                    value: demand,
                });
            }
            *node = node.clone().with_demand(demand);
        }
        Ok(())
    }

    /// Attaches one capacity per vehicle.
    pub fn set_capacities(&mut self, capacities: &[i64]) -> Result<(), ConfigurationError> {
        expect_len("vehicle_capacity", capacities.len(), self.vehicles.len())?;
        for (position, (vehicle, &capacity)) in
            self.vehicles.iter_mut().zip(capacities).enumerate()
        {
            if capacity < 0 {
                return Err(ConfigurationError::Negative {
                    field: "vehicle_capacity",
                    position,
                    value: capacity,
                });
            }
            *vehicle = vehicle.clone().with_capacity(capacity);
        }
        Ok(())
    }

    /// Attaches one shift window per vehicle.
    pub fn set_shifts(&mut self, shifts: &[ShiftWindow]) -> Result<(), ConfigurationError> {
        expect_len("vehicle_shifts", shifts.len(), self.vehicles.len())?;
        for (vehicle, &shift) in self.vehicles.iter_mut().zip(shifts) {
            *vehicle = vehicle.clone().with_shift(shift);
        }
        Ok(())
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: usize) -> &Vehicle {
        &self.vehicles[id]
    }

    /// Internal index of the node with the given identifier.
    pub fn node_index(&self, external_id: &str) -> Option<usize> {
        self.node_lookup.get(external_id).copied()
    }

    /// Internal index of the vehicle with the given identifier.
    pub fn vehicle_index(&self, external_id: &str) -> Option<usize> {
        self.vehicle_lookup.get(external_id).copied()
    }

    /// Returns `true` if the node is some vehicle's start or end.
    pub fn is_depot(&self, index: usize) -> bool {
        self.depot[index]
    }

    /// Indices of every routable (non-depot) node, ascending.
    pub fn stops(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(|&i| !self.depot[i])
    }

    /// Returns `true` if any node declares a positive demand.
    pub fn has_demands(&self) -> bool {
        self.nodes.iter().any(|n| n.demand() > 0)
    }
}

fn check_endpoints(
    field: &'static str,
    indices: &[usize],
    num_vehicles: usize,
    num_nodes: usize,
) -> Result<(), ConfigurationError> {
    expect_len(field, indices.len(), num_vehicles)?;
    match indices.iter().position(|&i| i >= num_nodes) {
        Some(position) => Err(ConfigurationError::IndexOutOfRange {
            field,
            position,
            index: indices[position],
            len: num_nodes,
        }),
        None => Ok(()),
    }
}

fn expect_len(field: &'static str, actual: usize, expected: usize) -> Result<(), ConfigurationError> {
    if actual != expected {
        return Err(ConfigurationError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn index_ids(
    field: &'static str,
    ids: &[String],
) -> Result<HashMap<String, usize>, ConfigurationError> {
    let mut lookup = HashMap::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if lookup.insert(id.clone(), i).is_some() {
            return Err(ConfigurationError::DuplicateId {
                field,
                id: id.clone(),
            });
        }
    }
    Ok(lookup)
}
