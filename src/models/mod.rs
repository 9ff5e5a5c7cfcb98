pub mod chat;
pub mod request;

pub use chat::*;
pub use request::*;
