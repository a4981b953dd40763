pub mod handle_echo_query;

pub use handle_echo_query::{EchoResponse, HandleEchoQueryUseCase};
