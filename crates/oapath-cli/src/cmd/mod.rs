pub mod audit;
pub mod author;
pub mod paper;
