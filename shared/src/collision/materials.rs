use std::collections::HashMap;

use rapier2d::prelude::{ContactModificationContext, PhysicsHooks};

use super::{seams::smooth_seam_contact, types::Material};
use crate::constants::{PLAYER_WALL_FRICTION, PLAYER_WALL_RESTITUTION};

/// Friction and restitution used when two materials touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactCoefficients {
    pub friction: f32,
    pub restitution: f32,
}

/// Contact material table keyed by unordered material pairs.
///
/// Installed as the physics hook of the world engine: every solver contact between two
/// registered materials gets the pair's coefficients. Unregistered pairs keep the
/// engine defaults. Contacts on tile seams are smoothed first.
#[derive(Clone, Debug, Default)]
pub struct ContactMaterials {
    pairs: HashMap<(Material, Material), ContactCoefficients>,
}

impl ContactMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, a: Material, b: Material, coefficients: ContactCoefficients) {
        self.pairs.insert(Self::key(a, b), coefficients);
    }

    pub fn get(&self, a: Material, b: Material) -> Option<ContactCoefficients> {
        self.pairs.get(&Self::key(a, b)).copied()
    }

    fn key(a: Material, b: Material) -> (Material, Material) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl Default for ContactCoefficients {
    fn default() -> Self {
        Self {
            friction: PLAYER_WALL_FRICTION,
            restitution: PLAYER_WALL_RESTITUTION,
        }
    }
}

/// The table every session starts with: `Player` against `Wall`.
pub fn default_contact_materials() -> ContactMaterials {
    let mut materials = ContactMaterials::new();
    materials.insert(
        Material::Player,
        Material::Wall,
        ContactCoefficients::default(),
    );
    materials
}

impl PhysicsHooks for ContactMaterials {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        smooth_seam_contact(context);

        let material_of = |handle| {
            context
                .colliders
                .get(handle)
                .and_then(|c| Material::from_user_data(c.user_data))
        };
        let (Some(a), Some(b)) = (material_of(context.collider1), material_of(context.collider2))
        else {
            return;
        };
        let Some(coefficients) = self.get(a, b) else {
            return;
        };

        for contact in context.solver_contacts.iter_mut() {
            contact.friction = coefficients.friction;
            contact.restitution = coefficients.restitution;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_pair_order() {
        let materials = default_contact_materials();
        let ab = materials.get(Material::Player, Material::Wall);
        let ba = materials.get(Material::Wall, Material::Player);
        assert_eq!(ab, ba);
        assert_eq!(ab.map(|c| c.friction), Some(0.75));
        assert_eq!(ab.map(|c| c.restitution), Some(0.05));
    }

    #[test]
    fn unregistered_pairs_have_no_coefficients() {
        let materials = default_contact_materials();
        assert_eq!(materials.get(Material::Wall, Material::Wall), None);
    }

    #[test]
    fn insert_overrides_existing_pair() {
        let mut materials = default_contact_materials();
        materials.insert(
            Material::Wall,
            Material::Player,
            ContactCoefficients {
                friction: 0.1,
                restitution: 0.9,
            },
        );
        let c = materials.get(Material::Player, Material::Wall).unwrap();
        assert_eq!(c.friction, 0.1);
        assert_eq!(c.restitution, 0.9);
    }
}
