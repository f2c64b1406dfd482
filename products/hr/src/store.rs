//! Employee persistence.
//!
//! [`EmployeeStore`] is the seam the service depends on; [`SeaOrmEmployeeStore`]
//! backs it with the `employees` table on any SeaORM backend.

use async_trait::async_trait;
use entity::employees;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Statement, TransactionTrait,
};
use thiserror::Error;
use tracing::debug;

use crate::model::Employee;

const FIND_BY_NAME_POSTGRES: &str = "SELECT id, first_name, last_name, email FROM employees \
     WHERE first_name = $1 AND last_name = $2 ORDER BY id LIMIT 1";
const FIND_BY_NAME_QMARK: &str = "SELECT id, first_name, last_name, email FROM employees \
     WHERE first_name = ? AND last_name = ? ORDER BY id LIMIT 1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("employee {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert when `id` is unset, otherwise overwrite the row with that id.
    async fn save(&self, employee: Employee) -> StoreResult<Employee>;
    /// Save every record in one transaction.
    async fn save_all(&self, employees: Vec<Employee>) -> StoreResult<Vec<Employee>>;
    async fn find_all(&self) -> StoreResult<Vec<Employee>>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>>;
    async fn find_by_name(&self, first_name: &str, last_name: &str)
    -> StoreResult<Option<Employee>>;
    /// Same lookup as [`EmployeeStore::find_by_name`], issued as hand-written SQL.
    async fn find_by_name_native(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<Employee>>;
    /// Unsaved records and missing rows are ignored.
    async fn delete(&self, employee: &Employee) -> StoreResult<()>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    /// Returns the number of rows removed.
    async fn delete_all(&self) -> StoreResult<u64>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeStore {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn into_inner(self) -> DatabaseConnection {
        self.db
    }
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn save(&self, employee: Employee) -> StoreResult<Employee> {
        persist(&self.db, employee).await
    }

    async fn save_all(&self, employees: Vec<Employee>) -> StoreResult<Vec<Employee>> {
        let txn = self.db.begin().await?;
        let mut saved = Vec::with_capacity(employees.len());
        for employee in employees {
            saved.push(persist(&txn, employee).await?);
        }
        txn.commit().await?;
        Ok(saved)
    }

    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        let row = employees::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        let row = employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .order_by_asc(employees::Column::Id)
            .one(&self.db)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<Employee>> {
        let row = employees::Entity::find()
            .filter(employees::Column::FirstName.eq(first_name))
            .filter(employees::Column::LastName.eq(last_name))
            .order_by_asc(employees::Column::Id)
            .one(&self.db)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn find_by_name_native(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<Employee>> {
        let backend = self.db.get_database_backend();
        let statement = Statement::from_sql_and_values(
            backend,
            find_by_name_sql(backend),
            [first_name.into(), last_name.into()],
        );
        let row = employees::Entity::find()
            .from_raw_sql(statement)
            .one(&self.db)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn delete(&self, employee: &Employee) -> StoreResult<()> {
        match employee.id {
            Some(id) => self.delete_by_id(id).await,
            None => Ok(()),
        }
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        debug!(id, rows = res.rows_affected, "employee delete");
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let res = employees::Entity::delete_many().exec(&self.db).await?;
        debug!(rows = res.rows_affected, "employees cleared");
        Ok(res.rows_affected)
    }
}

fn find_by_name_sql(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Postgres => FIND_BY_NAME_POSTGRES,
        DatabaseBackend::MySql | DatabaseBackend::Sqlite => FIND_BY_NAME_QMARK,
    }
}

async fn persist<C: ConnectionTrait>(conn: &C, employee: Employee) -> StoreResult<Employee> {
    let Employee {
        id,
        first_name,
        last_name,
        email,
    } = employee;
    match id {
        None => {
            let model = employees::ActiveModel {
                id: NotSet,
                first_name: Set(first_name),
                last_name: Set(last_name),
                email: Set(email),
            }
            .insert(conn)
            .await?;
            debug!(id = model.id, "employee inserted");
            Ok(model.into())
        }
        Some(id) => {
            let active = employees::ActiveModel {
                id: Unchanged(id),
                first_name: Set(first_name),
                last_name: Set(last_name),
                email: Set(email),
            };
            match active.update(conn).await {
                Ok(model) => Ok(model.into()),
                Err(DbErr::RecordNotUpdated) => Err(StoreError::NotFound(id)),
                Err(err) => Err(err.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn migrated() -> SeaOrmEmployeeStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmEmployeeStore::new(db)
    }

    #[tokio::test]
    async fn database_errors_propagate_unchanged() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let store = SeaOrmEmployeeStore::new(db);
        let err = store.find_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(err.to_string().contains("no such table"));
    }

    #[test]
    fn native_name_lookup_uses_backend_placeholders() {
        let postgres = find_by_name_sql(DatabaseBackend::Postgres);
        assert!(postgres.contains("first_name = $1 AND last_name = $2"));
        for backend in [DatabaseBackend::Sqlite, DatabaseBackend::MySql] {
            let sql = find_by_name_sql(backend);
            assert!(sql.contains("first_name = ? AND last_name = ?"));
            assert!(!sql.contains('$'));
        }
    }

    #[tokio::test]
    async fn native_name_lookup_runs_on_sqlite() {
        let store = migrated().await;
        let saved = store
            .save(Employee::new("Dipanjan", "Das", "dipanjan@hotmail.com"))
            .await
            .unwrap();
        let found = store.find_by_name_native("Dipanjan", "Das").await.unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn updating_a_vanished_row_reports_not_found() {
        let store = migrated().await;
        let err = store
            .save(Employee::new("Ram", "Das", "ram@x.test").with_id(42))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
        assert_eq!(err.to_string(), "employee 42 not found");
    }

    #[tokio::test]
    async fn deleting_an_unsaved_record_touches_nothing() {
        let store = migrated().await;
        store
            .save(Employee::new("Ram", "Das", "ram@x.test"))
            .await
            .unwrap();
        store
            .delete(&Employee::new("Ram", "Das", "ram@x.test"))
            .await
            .unwrap();
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clones_share_the_same_pool() {
        let store = migrated().await;
        let other = store.clone();
        store
            .save(Employee::new("Bidisa", "Das", "das.bidisa@hotmail.com"))
            .await
            .unwrap();
        assert_eq!(other.find_all().await.unwrap().len(), 1);
    }
}
