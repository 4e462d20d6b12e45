//! Tenant application pipeline.
//!
//! - `status` - Pipeline stages and their transition rules
//! - `pipeline` - Board layout and user commands that move cards

mod pipeline;
mod status;

pub use pipeline::{
    plan_move, ApplicationCard, DropTarget, MoveOutcome, PipelineBoard, PipelineColumn,
    PipelineCommand, PipelineError, QuickActions,
};
pub use status::ApplicationStatus;
