pub mod catalog_store;
pub mod classifier;
pub mod lines;
pub mod m3u_parser;
pub mod tmdb;
