// CV PDFs: upload and CRUD, page rendering, page images, PDF → text, full pipeline.

pub mod handlers;
pub mod images;
pub mod pipeline;
pub mod render;
pub mod repo;
pub mod storage;
pub mod workflow;
