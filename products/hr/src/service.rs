use std::sync::Arc;

use tracing::instrument;

use crate::{
    model::Employee,
    store::{EmployeeStore, StoreResult},
};

/// Orchestrates employee operations on top of an [`EmployeeStore`].
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "employees.save", skip_all)]
    pub async fn save_employee(&self, employee: Employee) -> StoreResult<Employee> {
        self.store.save(employee).await
    }

    #[instrument(name = "employees.list", skip_all)]
    pub async fn get_all_employees(&self) -> StoreResult<Vec<Employee>> {
        self.store.find_all().await
    }

    #[instrument(name = "employees.get", skip(self))]
    pub async fn get_employee_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        self.store.find_by_id(id).await
    }

    /// Persist a record the caller already fetched and changed.
    #[instrument(name = "employees.update", skip_all, fields(id = ?employee.id))]
    pub async fn update_employee(&self, employee: Employee) -> StoreResult<Employee> {
        self.store.save(employee).await
    }

    #[instrument(name = "employees.delete", skip(self))]
    pub async fn delete_employee(&self, id: i64) -> StoreResult<()> {
        self.store.delete_by_id(id).await
    }
}
