pub mod controller;
pub mod model;
pub mod repo;
pub mod service;
