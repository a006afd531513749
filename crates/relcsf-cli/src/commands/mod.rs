pub mod couple;
pub mod generate;
