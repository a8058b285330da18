pub mod arcade;
pub mod model;
