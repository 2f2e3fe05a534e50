/*!
Collision data types shared by the world engine, the map builder and the player.

Collision filtering is bitmask based and part of the data contract with the draw
collaborator, which colors shapes by group:

| bit | group  |
|-----|--------|
| 0   | WALL   |
| 1   | PLAYER |
*/

use nalgebra::Vector2;
use rapier2d::prelude::Group;
use serde::{Deserialize, Serialize};

use crate::{bitmask_flags::BitmaskFlags, rapier::BodyHandle};

crate::define_bitmask_flags!(Side, u8, { Left, Right, Top, Bottom });

/// Sides of a rectangle that continue flush into a neighboring solid rectangle.
///
/// Contacts on the corners of such sides are treated as contacts on the continuing face,
/// so a player sliding across a row of tiles does not catch on the seams.
pub type Seams = BitmaskFlags<u8>;

/// Low byte: material. Next byte: seams.
const SEAMS_SHIFT: u32 = 8;

/// The single group a shape belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum CollisionGroup {
    Wall = 1 << 0,
    Player = 1 << 1,
}

impl CollisionGroup {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub fn to_rapier(self) -> Group {
        Group::from_bits_truncate(self.bits())
    }
}

/// The set of groups a shape is tested against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const NONE: Self = Self(0);
    pub const WALL: Self = Self(CollisionGroup::Wall.bits());
    pub const PLAYER: Self = Self(CollisionGroup::Player.bits());

    pub fn contains(self, group: CollisionGroup) -> bool {
        self.0 & group.bits() != 0
    }

    pub fn to_rapier(self) -> Group {
        Group::from_bits_truncate(self.0)
    }
}

impl From<CollisionGroup> for CollisionMask {
    fn from(group: CollisionGroup) -> Self {
        Self(group.bits())
    }
}

/// Named surface material. Stored in each collider's `user_data` so the
/// contact-material hook can look up the pair coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    Player = 1,
    Wall = 2,
}

impl Material {
    pub const fn to_user_data(self) -> u128 {
        self as u128
    }

    pub fn from_user_data(data: u128) -> Option<Self> {
        match data & 0xff {
            1 => Some(Material::Player),
            2 => Some(Material::Wall),
            _ => None,
        }
    }
}

/// Collider `user_data` carrying both the material and the seams of its body.
pub fn collider_user_data(material: Material, seams: Seams) -> u128 {
    material.to_user_data() | (u128::from(seams.bits()) << SEAMS_SHIFT)
}

pub fn seams_from_user_data(data: u128) -> Seams {
    Seams::new(((data >> SEAMS_SHIFT) & 0xff) as u8)
}

/// A live contact point on a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactPoint {
    /// Contact location relative to the body origin, in world orientation.
    pub offset: Vector2<f32>,
    /// Signed separation; negative means penetration.
    pub separation: f32,
    /// The body on the other side of the contact, if it has one.
    pub other: Option<BodyHandle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_and_player_occupy_bits_zero_and_one() {
        assert_eq!(CollisionGroup::Wall.bits(), 0b01);
        assert_eq!(CollisionGroup::Player.bits(), 0b10);
    }

    #[test]
    fn masks_only_contain_their_groups() {
        assert!(CollisionMask::WALL.contains(CollisionGroup::Wall));
        assert!(!CollisionMask::WALL.contains(CollisionGroup::Player));
        assert!(!CollisionMask::NONE.contains(CollisionGroup::Wall));
    }

    #[test]
    fn material_survives_user_data() {
        for m in [Material::Player, Material::Wall] {
            assert_eq!(Material::from_user_data(m.to_user_data()), Some(m));
        }
        assert_eq!(Material::from_user_data(0), None);
    }

    #[test]
    fn seams_share_user_data_with_the_material() {
        let mut seams = Seams::default();
        seams.add(Side::Left);
        seams.add(Side::Bottom);

        let data = collider_user_data(Material::Wall, seams);
        assert_eq!(Material::from_user_data(data), Some(Material::Wall));
        assert_eq!(seams_from_user_data(data), seams);
        assert_eq!(
            seams_from_user_data(collider_user_data(Material::Player, Seams::default())),
            Seams::default()
        );
    }
}
