pub mod error;
pub mod model;

pub use error::*;
pub use model::entry::*;
pub use model::overlap::*;
pub use model::textgrid::*;
pub use model::tier::*;
