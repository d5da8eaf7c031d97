pub mod extraction;
pub mod handlers;
pub mod prompts;
pub mod repo;
pub mod skills;
