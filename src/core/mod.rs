//! Core types: the task record and the repository that persists it.

pub mod repository;
pub mod task;

pub use repository::TaskRepository;
pub use task::Task;
