pub mod appliance;
pub mod band;
pub mod ordering;
pub mod payload;
pub mod point;
pub mod resolver;
pub mod savings;
pub mod scheduler;
pub mod series;
pub mod settlement;
pub mod strategy;
