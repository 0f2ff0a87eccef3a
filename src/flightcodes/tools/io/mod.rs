pub mod delimited;
pub mod render;
