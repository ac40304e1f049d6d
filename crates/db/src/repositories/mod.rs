//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod car;
pub mod error;
pub mod payment;
pub mod report;
pub mod service;
pub mod service_record;
pub mod session;
pub mod user;

pub use car::{CarRepository, NewCar};
pub use error::RepositoryError;
pub use payment::PaymentRepository;
pub use report::ReportRepository;
pub use service::ServiceCatalogRepository;
pub use service_record::{ServiceRecordInput, ServiceRecordRepository};
pub use session::SessionRepository;
pub use user::UserRepository;
