// Domain layer - Chart values and the grid they are placed on
pub mod error;
pub mod figure;
pub mod grid;
pub mod sales;
