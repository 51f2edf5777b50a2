pub mod pairs;
pub mod volume;
