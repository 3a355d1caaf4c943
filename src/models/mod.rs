pub mod analysis;
pub mod claim;
pub mod enums;

pub use analysis::*;
pub use claim::*;
pub use enums::*;
