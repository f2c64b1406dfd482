//! HR vertical slice: employee records, their persistence and the service
//! layer the HTTP surface calls into.

pub mod model;
pub mod service;
pub mod store;

pub use model::Employee;
pub use service::EmployeeService;
pub use store::{EmployeeStore, SeaOrmEmployeeStore, StoreError, StoreResult};
