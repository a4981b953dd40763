pub mod forwarding;
pub mod server;
pub mod upstream;

pub use server::{EchoHandler, ForwardHandler};
pub use upstream::UdpUpstreamResolver;
