pub mod backend;
pub mod demo;

pub use backend::BackendAdapter;
pub use demo::DemoAdapter;
