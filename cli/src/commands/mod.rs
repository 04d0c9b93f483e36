mod crdgen;
mod list;
mod render;
mod schema;

pub use crdgen::crdgen;
pub use list::list;
pub use render::{load_config, render};
pub use schema::schema;
