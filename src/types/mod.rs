mod comment;
mod connection;
mod issue;
mod label;
mod priority;
mod project;
mod user;

pub use comment::Comment;
pub use connection::Connection;
pub use issue::{Issue, StateType, WorkflowState};
pub use label::Label;
pub use priority::Priority;
pub use project::Project;
pub use user::User;
