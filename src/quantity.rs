#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod power;
pub mod price;
