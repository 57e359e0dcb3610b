//! Employee accounts and login

use shared::error::ErrorCode;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, LoginRequest, LoginResponse, Role};
use sqlx::SqlitePool;

use super::{WorkflowError, WorkflowResult};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{CurrentUser, JwtService, Operation, authorize};
use crate::db::repository::{RepoError, employee};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_required_text,
};

fn validate_password(password: &str) -> WorkflowResult<()> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(WorkflowError::validation(format!(
            "password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn hash(password: &str) -> WorkflowResult<String> {
    hash_password(password)
        .map_err(|e| WorkflowError::internal(format!("Failed to hash password: {e}")))
}

/// Check credentials and issue a token
///
/// Unknown usernames and wrong passwords fail identically.
pub async fn login(
    pool: &SqlitePool,
    jwt: &JwtService,
    req: LoginRequest,
) -> WorkflowResult<LoginResponse> {
    let username = req.username.trim();
    let Some(found) = employee::find_by_username(pool, username).await? else {
        crate::security_log!("WARN", "login_failed", username = username, reason = "unknown_user");
        return Err(WorkflowError::unauthenticated(ErrorCode::InvalidCredentials));
    };

    let stored = employee::find_password_hash(pool, found.id).await?.unwrap_or_default();
    if !verify_password(&req.password, &stored) {
        crate::security_log!("WARN", "login_failed", username = username, reason = "bad_password");
        return Err(WorkflowError::unauthenticated(ErrorCode::InvalidCredentials));
    }
    if !found.is_active {
        crate::security_log!("WARN", "login_failed", username = username, reason = "disabled");
        return Err(WorkflowError::unauthenticated(ErrorCode::AccountDisabled));
    }

    let token = jwt
        .generate_token(&found)
        .map_err(|e| WorkflowError::internal(e.to_string()))?;
    tracing::info!(employee_id = found.id, username = %found.username, role = %found.role, "Employee logged in");

    Ok(LoginResponse {
        token,
        expires_in: jwt.expires_in_seconds(),
        user: found,
    })
}

pub async fn create_employee(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: EmployeeCreate,
) -> WorkflowResult<Employee> {
    authorize(actor, Operation::ManageEmployees)?;
    let data = EmployeeCreate {
        username: data.username.trim().to_string(),
        ..data
    };
    validate_required_text(&data.username, "username", MAX_NAME_LEN)?;
    if let Some(name) = &data.display_name {
        validate_required_text(name, "display_name", MAX_NAME_LEN)?;
    }
    validate_password(&data.password)?;
    // Only a Director may create another Director
    if data.role == Role::Director && actor.role != Role::Director {
        return Err(WorkflowError::forbidden("Only a Director may create a Director"));
    }

    let password_hash = hash(&data.password)?;
    let created = employee::create(pool, &data, &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => WorkflowError::duplicate(
                ErrorCode::EmployeeUsernameExists,
                format!("Username '{}' is already taken", data.username),
            ),
            other => other.into(),
        })?;

    crate::security_log!(
        "INFO",
        "employee_created",
        employee_id = created.id,
        role = created.role.as_str(),
        actor_id = actor.id
    );
    Ok(created)
}

pub async fn update_employee(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: EmployeeUpdate,
) -> WorkflowResult<Employee> {
    authorize(actor, Operation::ManageEmployees)?;
    let current = get_employee(pool, actor, id).await?;
    if let Some(name) = &data.display_name {
        validate_required_text(name, "display_name", MAX_NAME_LEN)?;
    }
    if actor.id == id && (data.is_active == Some(false) || data.role.is_some_and(|r| r != current.role)) {
        return Err(WorkflowError::forbidden(
            "You cannot deactivate yourself or change your own role",
        ));
    }
    let touches_director = current.role == Role::Director || data.role == Some(Role::Director);
    if touches_director && actor.role != Role::Director && actor.id != id {
        return Err(WorkflowError::forbidden("Only a Director may manage a Director"));
    }

    let password_hash = match &data.password {
        Some(password) => {
            validate_password(password)?;
            Some(hash(password)?)
        }
        None => None,
    };

    let updated = employee::update(pool, id, &data, password_hash.as_deref()).await?;
    crate::security_log!(
        "INFO",
        "employee_updated",
        employee_id = id,
        actor_id = actor.id,
        password_changed = password_hash.is_some(),
        is_active = updated.is_active
    );
    Ok(updated)
}

pub async fn list_employees(
    pool: &SqlitePool,
    actor: &CurrentUser,
    role: Option<Role>,
) -> WorkflowResult<Vec<Employee>> {
    authorize(actor, Operation::ViewEmployees)?;
    Ok(employee::find_all(pool, role).await?)
}

pub async fn get_employee(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
) -> WorkflowResult<Employee> {
    if actor.id != id {
        authorize(actor, Operation::ViewEmployees)?;
    }
    employee::find_by_id(pool, id).await?.ok_or_else(|| {
        WorkflowError::not_found(ErrorCode::EmployeeNotFound, format!("Employee {id} not found"))
    })
}
