mod configuration;
mod request;
mod response;

#[allow(unused_imports)]
pub use {configuration::*, request::*, response::*};
