//! Application pipeline handlers.

mod get_pipeline_board;
mod move_application;

#[cfg(test)]
pub(crate) mod test_support;

pub use get_pipeline_board::{GetPipelineBoardHandler, GetPipelineBoardQuery};
pub use move_application::{MoveApplicationCommand, MoveApplicationHandler, MoveApplicationResult};
