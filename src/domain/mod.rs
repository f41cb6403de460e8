pub mod model;
pub mod order;
pub mod rank;
pub mod report;
pub mod sequence;
