pub mod generated;
pub mod options;
pub mod persistance;
pub mod self_play;

pub use crate::generated::*;
pub use crate::options::*;
pub use crate::persistance::*;
pub use crate::self_play::*;
