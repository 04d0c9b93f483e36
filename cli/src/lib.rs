mod commands;

pub use commands::{crdgen, list, load_config, render, schema};
