//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, Role};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, username, display_name, role, is_active, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

/// Password hash is never part of [`Employee`]; fetch it separately for login
pub async fn find_password_hash(pool: &SqlitePool, id: i64) -> RepoResult<Option<String>> {
    let hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(hash)
}

pub async fn find_all(pool: &SqlitePool, role: Option<Role>) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE (?1 IS NULL OR role = ?1) ORDER BY display_name, id"
    ))
    .bind(role)
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

/// Active employees holding any of `roles`
pub async fn find_active_by_roles(pool: &SqlitePool, roles: &[Role]) -> RepoResult<Vec<Employee>> {
    let mut employees = Vec::new();
    for role in roles {
        let batch = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {COLUMNS} FROM employees WHERE role = ? AND is_active = 1 ORDER BY id"
        ))
        .bind(role)
        .fetch_all(pool)
        .await?;
        employees.extend(batch);
    }
    employees.sort_by_key(|e| e.id);
    Ok(employees)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Insert an employee; `password_hash` is the already-hashed password
pub async fn create(
    pool: &SqlitePool,
    data: &EmployeeCreate,
    password_hash: &str,
) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let display_name = data
        .display_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(&data.username);

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employees (username, display_name, password_hash, role, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5) RETURNING id",
    )
    .bind(&data.username)
    .bind(display_name)
    .bind(password_hash)
    .bind(data.role)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Username '{}' already exists", data.username))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &EmployeeUpdate,
    password_hash: Option<&str>,
) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE employees SET display_name = COALESCE(?1, display_name), role = COALESCE(?2, role), is_active = COALESCE(?3, is_active), password_hash = COALESCE(?4, password_hash), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.display_name.as_deref())
    .bind(data.role)
    .bind(data.is_active)
    .bind(password_hash)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    fn new_employee(username: &str, role: Role) -> EmployeeCreate {
        EmployeeCreate {
            username: username.into(),
            password: String::new(),
            display_name: None,
            role,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create(&pool, &new_employee("tunde", Role::Driver), "hash")
            .await
            .unwrap();

        assert_eq!(created.display_name, "tunde");
        assert!(created.is_active);
        let found = find_by_username(&pool, "tunde").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(
            find_password_hash(&pool, created.id).await.unwrap().as_deref(),
            Some("hash")
        );
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let pool = test_pool().await;
        create(&pool, &new_employee("ngozi", Role::Packer), "h")
            .await
            .unwrap();
        let err = create(&pool, &new_employee("ngozi", Role::Loader), "h")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_role_with_space_round_trips() {
        let pool = test_pool().await;
        let created = create(&pool, &new_employee("bayo", Role::DriverAssistant), "h")
            .await
            .unwrap();
        assert_eq!(created.role, Role::DriverAssistant);

        let assistants = find_all(&pool, Some(Role::DriverAssistant)).await.unwrap();
        assert_eq!(assistants.len(), 1);
        assert!(find_all(&pool, Some(Role::Driver)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let pool = test_pool().await;
        let created = create(&pool, &new_employee("ada", Role::Packer), "h")
            .await
            .unwrap();

        let update_data = EmployeeUpdate {
            role: Some(Role::StoreKeeper),
            is_active: Some(false),
            ..Default::default()
        };
        let updated = update(&pool, created.id, &update_data, None).await.unwrap();
        assert_eq!(updated.role, Role::StoreKeeper);
        assert!(!updated.is_active);
        assert_eq!(updated.display_name, "ada");

        let active = find_active_by_roles(&pool, &[Role::StoreKeeper]).await.unwrap();
        assert!(active.is_empty());

        let missing = update(&pool, 999, &update_data, None).await.unwrap_err();
        assert!(matches!(missing, RepoError::NotFound(_)));
    }
}
