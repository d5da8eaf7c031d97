// Match scoring: pure arithmetic in calculation, persistence in repo.

pub mod calculation;
pub mod handlers;
pub mod repo;
pub mod service;
