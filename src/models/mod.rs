pub mod request;
pub mod result;

pub use request::*;
pub use result::*;
