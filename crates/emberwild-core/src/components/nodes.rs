//! Gatherable resource nodes: trees, rocks, bushes and water.

use emberwild_logic::geometry::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Tree,
    Rock,
    Bush,
    Water,
}

impl NodeKind {
    /// Water never runs out; everything else is removed and regrows.
    pub fn depletes(&self) -> bool {
        !matches!(self, NodeKind::Water)
    }

    /// Tool that boosts the yield of this node.
    pub fn tool(&self) -> Option<&'static str> {
        match self {
            NodeKind::Tree => Some("axe"),
            NodeKind::Rock => Some("pickaxe"),
            NodeKind::Bush | NodeKind::Water => None,
        }
    }

    /// Item this node yields. Bushes pick apple or berry once, at spawn.
    pub fn roll_resource(&self, rng: &mut impl Rng) -> &'static str {
        match self {
            NodeKind::Tree => "wood",
            NodeKind::Rock => "stone",
            NodeKind::Bush => {
                if rng.gen_bool(0.5) {
                    "apple"
                } else {
                    "berry"
                }
            }
            NodeKind::Water => "water_bottle",
        }
    }
}

/// Component for a gatherable node entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Vec3,
    pub resource: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_node_resources() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(NodeKind::Tree.roll_resource(&mut rng), "wood");
        assert_eq!(NodeKind::Rock.roll_resource(&mut rng), "stone");
        assert_eq!(NodeKind::Water.roll_resource(&mut rng), "water_bottle");
        for _ in 0..10 {
            let fruit = NodeKind::Bush.roll_resource(&mut rng);
            assert!(fruit == "apple" || fruit == "berry");
        }
    }

    #[test]
    fn test_depletion_and_tools() {
        assert!(NodeKind::Tree.depletes());
        assert!(!NodeKind::Water.depletes());
        assert_eq!(NodeKind::Tree.tool(), Some("axe"));
        assert_eq!(NodeKind::Rock.tool(), Some("pickaxe"));
        assert_eq!(NodeKind::Bush.tool(), None);
    }
}
