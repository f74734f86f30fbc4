//! Structure-of-arrays storage for the sampled population.

use ct_core::{Direction, NodeId, PersonId};

/// One sampled commuter, assembled from the [`Population`] columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SampledPerson {
    pub person_id:      PersonId,
    pub origin:         NodeId,
    pub destination:    NodeId,
    pub departure_time: i64,
    pub return_time:    i64,
}

impl SampledPerson {
    /// `(from, to, start_time)` of the given leg.
    pub fn leg(&self, direction: Direction) -> (NodeId, NodeId, i64) {
        match direction {
            Direction::ToWork => (self.origin, self.destination, self.departure_time),
            Direction::ToHome => (self.destination, self.origin, self.return_time),
        }
    }
}

/// Every sampled person of a run, one `Vec` per field, indexed by
/// `PersonId`.
///
/// Built once by the sampler and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Population {
    pub origin:         Vec<NodeId>,
    pub destination:    Vec<NodeId>,
    pub departure_time: Vec<i64>,
    pub return_time:    Vec<i64>,
}

impl Population {
    pub fn len(&self) -> usize {
        self.origin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origin.is_empty()
    }

    /// Row view of one person.
    ///
    /// # Panics
    ///
    /// If `id` is outside `0..len()`.
    pub fn person(&self, id: PersonId) -> SampledPerson {
        let i = id.index();
        SampledPerson {
            person_id:      id,
            origin:         self.origin[i],
            destination:    self.destination[i],
            departure_time: self.departure_time[i],
            return_time:    self.return_time[i],
        }
    }

    /// `(from, to)` pairs of `direction` for people `start..end`.
    pub fn pairs(&self, range: std::ops::Range<usize>, direction: Direction) -> Vec<(NodeId, NodeId)> {
        let (from, to) = match direction {
            Direction::ToWork => (&self.origin, &self.destination),
            Direction::ToHome => (&self.destination, &self.origin),
        };
        from[range.clone()].iter().copied().zip(to[range].iter().copied()).collect()
    }
}
