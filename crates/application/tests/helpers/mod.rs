mod builders;
mod mock_upstream;

pub use builders::{a_record, question};
pub use mock_upstream::MockUpstreamResolver;
