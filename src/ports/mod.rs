//! Port traits: the IO seams between the domain and the outside world.

pub mod config_port;
pub mod output_port;
pub mod source_port;
