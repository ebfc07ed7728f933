pub mod columns;
pub mod potential;
pub mod profile;
pub mod score;
pub mod table;
