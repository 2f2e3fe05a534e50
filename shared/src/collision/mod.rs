/*!
Collision root module.

Everything the core needs to reason about contacts lives here, on top of rapier2d:

- types:     collision groups/masks, surface materials, contact points
- settings:  contact tolerances
- materials: per-material-pair friction/restitution, applied through a physics hook
- ground:    jump-surface detection from live contact points
- seams:     contact normals across seams between adjacent tiles
*/

pub mod ground;
pub mod materials;
pub mod seams;
pub mod settings;
pub mod types;

pub use ground::{has_jump_support, is_jump_contact};
pub use materials::{ContactCoefficients, ContactMaterials};
pub use types::{CollisionGroup, CollisionMask, ContactPoint, Material, Seams, Side};
