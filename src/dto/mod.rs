pub mod refueling_dto;
