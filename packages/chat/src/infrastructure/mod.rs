//! Infrastructure layer: DTOs, presenters, storage and snapshot loading.

pub mod dto;
pub mod presenter;
pub mod repository;
pub mod snapshot;
