pub mod catalog;
pub mod health;
pub mod metadata;
pub mod playlist;
