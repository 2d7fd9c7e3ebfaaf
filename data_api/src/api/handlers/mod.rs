pub mod facilities;
