//! Commute leg direction shared by the routing and output crates.

/// Which leg of the daily commute a trip represents.
///
/// The outbound leg goes from the home (origin) node to the work
/// (destination) node; the return leg goes back.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Home → work, departing at the person's `departure_time`.
    ToWork,
    /// Work → home, departing at the person's `return_time`.
    ToHome,
}

impl Direction {
    /// Both directions in emission order.
    pub const BOTH: [Direction; 2] = [Direction::ToWork, Direction::ToHome];

    /// The `type` value written for trips of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::ToWork => "to_work",
            Direction::ToHome => "to_home",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
