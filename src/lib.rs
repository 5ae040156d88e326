pub mod app;
pub mod bridge;
pub mod data;
pub mod error;
pub mod model;
pub mod storage;
pub mod util;
pub mod view_models;

pub use app::App;
