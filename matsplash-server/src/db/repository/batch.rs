//! Batch Repository

use super::{RepoError, RepoResult};
use shared::models::{Assignment, Batch, BatchCapacity};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, batch_number, loader_id, bags_received, status, notes, created_at";

/// Attempts at drawing an unused batch number
const BATCH_NUMBER_ATTEMPTS: usize = 8;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Batch>> {
    let batch = sqlx::query_as::<_, Batch>(&format!("SELECT {COLUMNS} FROM batches WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(batch)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Batch>> {
    let batches = sqlx::query_as::<_, Batch>(&format!(
        "SELECT {COLUMNS} FROM batches ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(batches)
}

/// Σ bags_assigned over non-rejected assignments of a batch
pub async fn allocated_bags(pool: &SqlitePool, batch_id: i64) -> RepoResult<i64> {
    let allocated = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(bags_assigned), 0) FROM assignments WHERE batch_id = ? AND status != 'rejected'",
    )
    .bind(batch_id)
    .fetch_one(pool)
    .await?;
    Ok(allocated)
}

pub async fn find_with_capacity(pool: &SqlitePool, id: i64) -> RepoResult<Option<BatchCapacity>> {
    let Some(batch) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let allocated = allocated_bags(pool, id).await?;
    Ok(Some(BatchCapacity::new(batch, allocated)))
}

pub async fn find_all_with_capacity(pool: &SqlitePool) -> RepoResult<Vec<BatchCapacity>> {
    let batches = find_all(pool).await?;
    let mut result = Vec::with_capacity(batches.len());
    for batch in batches {
        let allocated = allocated_bags(pool, batch.id).await?;
        result.push(BatchCapacity::new(batch, allocated));
    }
    Ok(result)
}

async fn insert_batch(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    loader_id: i64,
    bags_received: i64,
    notes: Option<&str>,
    now: i64,
) -> RepoResult<i64> {
    for _ in 0..BATCH_NUMBER_ATTEMPTS {
        let number = shared::util::batch_number(now);
        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO batches (batch_number, loader_id, bags_received, status, notes, created_at) VALUES (?1, ?2, ?3, 'received', ?4, ?5) RETURNING id",
        )
        .bind(&number)
        .bind(loader_id)
        .bind(bags_received)
        .bind(notes)
        .bind(now)
        .fetch_one(&mut **tx)
        .await;

        match inserted.map_err(RepoError::from) {
            Ok(id) => return Ok(id),
            Err(RepoError::Duplicate(_)) => {
                tracing::debug!(batch_number = %number, "Batch number taken, drawing another");
            }
            Err(e) => return Err(e),
        }
    }
    Err(RepoError::Duplicate(
        "Could not allocate a unique batch number".into(),
    ))
}

pub async fn create(
    pool: &SqlitePool,
    loader_id: i64,
    bags_received: i64,
    notes: Option<&str>,
) -> RepoResult<Batch> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    let id = insert_batch(&mut tx, loader_id, bags_received, notes, now).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create batch".into()))
}

/// Batch plus its single assignment covering every bag, in one transaction
pub async fn create_with_assignment(
    pool: &SqlitePool,
    loader_id: i64,
    packer_id: i64,
    storekeeper_id: i64,
    bags: i64,
    notes: Option<&str>,
) -> RepoResult<(Batch, Assignment)> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let batch_id = insert_batch(&mut tx, loader_id, bags, notes, now).await?;
    let assignment_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO assignments (batch_id, packer_id, storekeeper_id, bags_assigned, status, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 'pending_review', ?5, ?6, ?6) RETURNING id",
    )
    .bind(batch_id)
    .bind(packer_id)
    .bind(storekeeper_id)
    .bind(bags)
    .bind(notes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    let batch = find_by_id(pool, batch_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create batch".into()))?;
    let assignment = super::assignment::find_by_id(pool, assignment_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create assignment".into()))?;
    Ok((batch, assignment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_employee, test_pool};
    use shared::models::{AssignmentStatus, Role};

    #[tokio::test]
    async fn test_create_generates_batch_number() {
        let pool = test_pool().await;
        let loader = seed_employee(&pool, "loader", Role::Loader).await;

        let batch = create(&pool, loader, 120, Some("morning truck")).await.unwrap();
        assert!(batch.batch_number.starts_with("BATCH-"));
        assert_eq!(batch.bags_received, 120);

        let with_capacity = find_with_capacity(&pool, batch.id).await.unwrap().unwrap();
        assert_eq!(with_capacity.bags_allocated, 0);
        assert_eq!(with_capacity.bags_remaining, 120);
    }

    #[tokio::test]
    async fn test_create_with_assignment_is_one_unit() {
        let pool = test_pool().await;
        let loader = seed_employee(&pool, "loader", Role::Loader).await;
        let packer = seed_employee(&pool, "packer", Role::Packer).await;
        let keeper = seed_employee(&pool, "keeper", Role::StoreKeeper).await;

        let (batch, assignment) = create_with_assignment(&pool, loader, packer, keeper, 80, None)
            .await
            .unwrap();
        assert_eq!(assignment.batch_id, batch.id);
        assert_eq!(assignment.bags_assigned, 80);
        assert_eq!(assignment.status, AssignmentStatus::PendingReview);
        assert_eq!(allocated_bags(&pool, batch.id).await.unwrap(), 80);
    }

    #[tokio::test]
    async fn test_failed_intake_rolls_back_batch() {
        let pool = test_pool().await;
        let loader = seed_employee(&pool, "loader", Role::Loader).await;

        // Unknown packer violates the foreign key after the batch row was written
        let err = create_with_assignment(&pool, loader, 9_999, loader, 10, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(find_all(&pool).await.unwrap().is_empty());
    }
}
