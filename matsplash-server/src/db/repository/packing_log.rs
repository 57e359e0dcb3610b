//! Packing Log Repository

use super::{RepoError, RepoResult};
use shared::models::{PackingLog, PackingLogStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, packer_id, storekeeper_id, manager_id, assignment_id, bags_packed, packing_date, status, disputed_bags, dispute_reason, packer_notes, storekeeper_notes, manager_notes, modification_comment, created_at, confirmed_at, approved_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PackingLog>> {
    let log = sqlx::query_as::<_, PackingLog>(&format!(
        "SELECT {COLUMNS} FROM packing_logs WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(log)
}

pub async fn find_by_packer(pool: &SqlitePool, packer_id: i64) -> RepoResult<Vec<PackingLog>> {
    let logs = sqlx::query_as::<_, PackingLog>(&format!(
        "SELECT {COLUMNS} FROM packing_logs WHERE packer_id = ? ORDER BY packing_date DESC, created_at DESC, id DESC"
    ))
    .bind(packer_id)
    .fetch_all(pool)
    .await?;
    Ok(logs)
}

/// Logs awaiting a manager (confirmed or disputed), newest first
pub async fn find_pending_approvals(pool: &SqlitePool) -> RepoResult<Vec<PackingLog>> {
    let logs = sqlx::query_as::<_, PackingLog>(&format!(
        "SELECT {COLUMNS} FROM packing_logs WHERE status IN ('confirmed', 'disputed') ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(logs)
}

/// Σ bags_packed over approved logs of a packer with `start <= packing_date < end`
pub async fn sum_approved_bags(
    pool: &SqlitePool,
    packer_id: i64,
    start_date: &str,
    end_date: &str,
) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(bags_packed), 0) FROM packing_logs WHERE packer_id = ?1 AND status = 'approved' AND packing_date >= ?2 AND packing_date < ?3",
    )
    .bind(packer_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// Σ bags_packed over every approved log (inventory production)
pub async fn sum_all_approved_bags(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(bags_packed), 0) FROM packing_logs WHERE status = 'approved'",
    )
    .fetch_one(pool)
    .await?;
    Ok(total)
}

pub struct NewPackingLog<'a> {
    pub packer_id: i64,
    pub storekeeper_id: i64,
    pub assignment_id: Option<i64>,
    pub bags_packed: i64,
    pub packing_date: &'a str,
    pub storekeeper_notes: Option<&'a str>,
}

pub async fn create(pool: &SqlitePool, data: NewPackingLog<'_>) -> RepoResult<PackingLog> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO packing_logs (packer_id, storekeeper_id, assignment_id, bags_packed, packing_date, status, storekeeper_notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6, ?7, ?7) RETURNING id",
    )
    .bind(data.packer_id)
    .bind(data.storekeeper_id)
    .bind(data.assignment_id)
    .bind(data.bags_packed)
    .bind(data.packing_date)
    .bind(data.storekeeper_notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create packing log".into()))
}

/// `pending → confirmed`
pub async fn confirm(pool: &SqlitePool, id: i64, packer_notes: Option<&str>) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE packing_logs SET status = 'confirmed', packer_notes = ?1, confirmed_at = ?2, updated_at = ?2 WHERE id = ?3 AND status = 'pending'",
    )
    .bind(packer_notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// `pending → disputed`
pub async fn dispute(
    pool: &SqlitePool,
    id: i64,
    disputed_bags: i64,
    reason: &str,
    packer_notes: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE packing_logs SET status = 'disputed', disputed_bags = ?1, dispute_reason = ?2, packer_notes = ?3, updated_at = ?4 WHERE id = ?5 AND status = 'pending'",
    )
    .bind(disputed_bags)
    .bind(reason)
    .bind(packer_notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// `from → approved`; `final_bags` overwrites bags_packed when present
pub async fn approve(
    pool: &SqlitePool,
    id: i64,
    from: PackingLogStatus,
    manager_id: i64,
    manager_notes: Option<&str>,
    final_bags: Option<i64>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE packing_logs SET status = 'approved', manager_id = ?1, manager_notes = ?2, bags_packed = COALESCE(?3, bags_packed), approved_at = ?4, updated_at = ?4 WHERE id = ?5 AND status = ?6",
    )
    .bind(manager_id)
    .bind(manager_notes)
    .bind(final_bags)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// `from → rejected`
pub async fn reject(
    pool: &SqlitePool,
    id: i64,
    from: PackingLogStatus,
    manager_id: i64,
    comment: &str,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE packing_logs SET status = 'rejected', manager_id = ?1, modification_comment = ?2, updated_at = ?3 WHERE id = ?4 AND status = ?5",
    )
    .bind(manager_id)
    .bind(comment)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// `rejected → pending`, starting a fresh confirmation cycle
pub async fn resubmit(
    pool: &SqlitePool,
    id: i64,
    bags_packed: i64,
    storekeeper_notes: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE packing_logs SET status = 'pending', bags_packed = ?1, storekeeper_notes = ?2, \
             disputed_bags = NULL, dispute_reason = NULL, packer_notes = NULL, manager_id = NULL, \
             manager_notes = NULL, modification_comment = NULL, confirmed_at = NULL, approved_at = NULL, updated_at = ?3 \
         WHERE id = ?4 AND status = 'rejected'",
    )
    .bind(bags_packed)
    .bind(storekeeper_notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_employee, test_pool};
    use shared::models::Role;

    async fn seeded() -> (SqlitePool, i64, i64, i64) {
        let pool = test_pool().await;
        let packer = seed_employee(&pool, "packer", Role::Packer).await;
        let keeper = seed_employee(&pool, "keeper", Role::StoreKeeper).await;
        let manager = seed_employee(&pool, "manager", Role::Manager).await;
        (pool, packer, keeper, manager)
    }

    fn new_log(packer_id: i64, storekeeper_id: i64, bags: i64, date: &str) -> NewPackingLog<'_> {
        NewPackingLog {
            packer_id,
            storekeeper_id,
            assignment_id: None,
            bags_packed: bags,
            packing_date: date,
            storekeeper_notes: None,
        }
    }

    #[tokio::test]
    async fn test_confirm_then_approve_with_final_bags() {
        let (pool, packer, keeper, manager) = seeded().await;
        let log = create(&pool, new_log(packer, keeper, 50, "2025-03-10"))
            .await
            .unwrap();

        assert_eq!(confirm(&pool, log.id, Some("ok")).await.unwrap(), 1);
        // Approve keyed on the wrong state matches nothing
        assert_eq!(
            approve(&pool, log.id, PackingLogStatus::Disputed, manager, None, None)
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            approve(&pool, log.id, PackingLogStatus::Confirmed, manager, Some("fine"), Some(48))
                .await
                .unwrap(),
            1
        );

        let approved = find_by_id(&pool, log.id).await.unwrap().unwrap();
        assert_eq!(approved.status, PackingLogStatus::Approved);
        assert_eq!(approved.bags_packed, 48);
        assert!(approved.confirmed_at.is_some());
        assert!(approved.approved_at.is_some());
    }

    #[tokio::test]
    async fn test_pending_approvals_newest_first() {
        let (pool, packer, keeper, _) = seeded().await;
        let first = create(&pool, new_log(packer, keeper, 10, "2025-03-01")).await.unwrap();
        let second = create(&pool, new_log(packer, keeper, 20, "2025-03-02")).await.unwrap();
        let untouched = create(&pool, new_log(packer, keeper, 30, "2025-03-03")).await.unwrap();

        confirm(&pool, first.id, None).await.unwrap();
        dispute(&pool, second.id, 2, "two torn bags", None).await.unwrap();

        let pending = find_pending_approvals(&pool).await.unwrap();
        let ids: Vec<i64> = pending.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(!ids.contains(&untouched.id));
    }

    #[tokio::test]
    async fn test_sum_approved_bags_by_month() {
        let (pool, packer, keeper, manager) = seeded().await;
        for (bags, date) in [(10, "2025-02-28"), (20, "2025-03-01"), (30, "2025-03-31"), (40, "2025-04-01")] {
            let log = create(&pool, new_log(packer, keeper, bags, date)).await.unwrap();
            confirm(&pool, log.id, None).await.unwrap();
            approve(&pool, log.id, PackingLogStatus::Confirmed, manager, None, None)
                .await
                .unwrap();
        }
        // Pending logs never count
        create(&pool, new_log(packer, keeper, 99, "2025-03-15")).await.unwrap();

        let march = sum_approved_bags(&pool, packer, "2025-03-01", "2025-04-01")
            .await
            .unwrap();
        assert_eq!(march, 50);
        assert_eq!(sum_all_approved_bags(&pool).await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_reject_and_resubmit_resets_cycle() {
        let (pool, packer, keeper, manager) = seeded().await;
        let log = create(&pool, new_log(packer, keeper, 50, "2025-03-10")).await.unwrap();
        dispute(&pool, log.id, 5, "short", Some("counted 45")).await.unwrap();
        assert_eq!(
            reject(&pool, log.id, PackingLogStatus::Disputed, manager, "recount please")
                .await
                .unwrap(),
            1
        );
        assert_eq!(resubmit(&pool, log.id, 45, Some("recounted")).await.unwrap(), 1);

        let fresh = find_by_id(&pool, log.id).await.unwrap().unwrap();
        assert_eq!(fresh.status, PackingLogStatus::Pending);
        assert_eq!(fresh.bags_packed, 45);
        assert!(fresh.dispute_reason.is_none());
        assert!(fresh.modification_comment.is_none());
        assert_eq!(find_by_packer(&pool, packer).await.unwrap().len(), 1);
    }
}
