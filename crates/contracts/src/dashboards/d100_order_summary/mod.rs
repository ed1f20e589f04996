pub mod category;
pub mod dto;
pub mod record;

pub use category::*;
pub use dto::*;
pub use record::*;
