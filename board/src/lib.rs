pub mod board;
pub mod dice;
pub mod identity;
pub mod moves;
pub mod phase;
pub mod player;

pub use crate::board::*;
pub use crate::dice::*;
pub use crate::identity::*;
pub use crate::moves::*;
pub use crate::phase::*;
pub use crate::player::*;
