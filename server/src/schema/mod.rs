mod player_input_table;
mod player_state_table;
mod player_table;
mod session_settings_table;

pub use player_input_table::*;
pub use player_state_table::*;
pub use player_table::*;
pub use session_settings_table::*;
