pub mod model;
pub mod page;
pub mod timeline;
pub mod view_model;

pub use page::OrderDetail;
