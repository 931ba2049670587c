pub mod codec;
pub mod envelope;


pub use codec::JsonCodec;
pub use envelope::{ParamMap, Request, Response};
