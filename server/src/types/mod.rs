mod db_hook;
mod db_vec2;

pub use db_hook::{DbHook, DbHookPhase};
pub use db_vec2::DbVec2;
