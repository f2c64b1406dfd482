use migration::{Migrator, MigratorTrait};
use products_hr::{Employee, SeaOrmEmployeeStore};
use sea_orm::Database;

/// A store over a fresh, migrated in-memory SQLite database.
pub async fn memory_store() -> SeaOrmEmployeeStore {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    SeaOrmEmployeeStore::new(db)
}

pub fn dipanjan() -> Employee {
    Employee::new("Dipanjan", "Das", "dipanjan@hotmail.com")
}

pub fn surjyatapa() -> Employee {
    Employee::new("Surjyatapa", "Das", "surjyatapa@hotmail.com")
}
