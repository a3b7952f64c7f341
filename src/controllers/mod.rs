pub mod health_controller;
pub mod refueling_controller;
