pub mod analysis;
pub mod inference;
pub mod routes;
pub mod storage;
