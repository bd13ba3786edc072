//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep outer layers decoupled from storage details.

pub mod entity_service;
pub mod error;
pub mod locality_service;
pub mod report_service;

pub use entity_service::EntityService;
pub use error::{ServiceError, ServiceResult};
pub use locality_service::LocalityService;
pub use report_service::ReportService;
