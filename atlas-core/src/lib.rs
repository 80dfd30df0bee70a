pub mod encoding;
pub mod model;
pub mod petal;
pub mod registry;
