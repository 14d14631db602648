pub mod parsed;
pub mod replayer;

pub use crate::parsed::*;
pub use crate::replayer::*;
