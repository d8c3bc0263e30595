mod headers;

#[allow(unused_imports)]
pub use headers::*;
