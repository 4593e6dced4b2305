//! Role labels for the circuits of a discrimination trial.

use serde::{Deserialize, Serialize};

/// Which circuit of a discrimination trial a histogram belongs to.
///
/// The postselection scheme runs four circuits per trial, the direct-sum
/// scheme two. The label records both the identity/U branch on the target
/// qubit and, for postselection, which discriminator part acted on the
/// ancilla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CircuitRole {
    /// Identity on target, V0-dagger on ancilla.
    #[serde(rename = "id_v0")]
    IdV0,
    /// Identity on target, V1-dagger on ancilla.
    #[serde(rename = "id_v1")]
    IdV1,
    /// U-dagger on target, V0-dagger on ancilla.
    #[serde(rename = "u_v0")]
    UV0,
    /// U-dagger on target, V1-dagger on ancilla.
    #[serde(rename = "u_v1")]
    UV1,
    /// Identity on target, direct-sum block on the pair.
    #[serde(rename = "id")]
    Id,
    /// U-dagger on target, direct-sum block on the pair.
    #[serde(rename = "u")]
    U,
}

impl CircuitRole {
    /// The postselection circuit roles, in submission order.
    pub const POSTSELECTION: [CircuitRole; 4] = [
        CircuitRole::IdV0,
        CircuitRole::IdV1,
        CircuitRole::UV0,
        CircuitRole::UV1,
    ];

    /// The direct-sum circuit roles, in submission order.
    pub const DIRECT_SUM: [CircuitRole; 2] = [CircuitRole::Id, CircuitRole::U];

    /// Role label as used in circuit names and result documents.
    pub fn name(&self) -> &'static str {
        match self {
            CircuitRole::IdV0 => "id_v0",
            CircuitRole::IdV1 => "id_v1",
            CircuitRole::UV0 => "u_v0",
            CircuitRole::UV1 => "u_v1",
            CircuitRole::Id => "id",
            CircuitRole::U => "u",
        }
    }
}

impl std::fmt::Display for CircuitRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(CircuitRole::IdV0.name(), "id_v0");
        assert_eq!(CircuitRole::UV1.name(), "u_v1");
        assert_eq!(CircuitRole::U.name(), "u");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&CircuitRole::UV0).unwrap();
        assert_eq!(json, r#""u_v0""#);
        let role: CircuitRole = serde_json::from_str(r#""id_v1""#).unwrap();
        assert_eq!(role, CircuitRole::IdV1);
    }

    #[test]
    fn test_fixed_role_sets() {
        assert_eq!(CircuitRole::POSTSELECTION.len(), 4);
        assert_eq!(CircuitRole::DIRECT_SUM.len(), 2);
    }
}
