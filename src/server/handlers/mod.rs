pub mod courier;
pub mod locations;
