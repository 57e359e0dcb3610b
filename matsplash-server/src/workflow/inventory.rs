//! Stock derived from the workflow tables plus manual adjustments

use shared::error::ErrorCode;
use shared::models::{InventoryAdjustmentCreate, InventoryLog, InventorySnapshot};
use sqlx::SqlitePool;

use super::{WorkflowError, WorkflowResult};
use crate::auth::{CurrentUser, Operation, authorize};
use crate::db::repository::{driver_sales, inventory, packing_log};
use crate::utils::validation::{MAX_BAGS, MAX_NOTE_LEN, validate_required_text};

/// Recomputed on every call; nothing is cached
pub async fn compute_current_inventory(
    pool: &SqlitePool,
    actor: &CurrentUser,
) -> WorkflowResult<InventorySnapshot> {
    authorize(actor, Operation::ViewInventory)?;

    let bags_received = inventory::sum_bags_received(pool).await?;
    let bags_allocated = inventory::sum_bags_allocated(pool).await?;
    let bags_produced = packing_log::sum_all_approved_bags(pool).await?;
    let (bags_dispatched, bags_returned) = driver_sales::dispatch_totals(pool).await?;
    let adjustments = inventory::sum_adjustments(pool).await?;

    Ok(InventorySnapshot {
        bags_received,
        bags_allocated,
        bags_produced,
        bags_dispatched,
        bags_returned,
        adjustments,
        current_stock: bags_produced - bags_dispatched + bags_returned + adjustments,
        computed_at: shared::util::now_millis(),
    })
}

pub async fn record_adjustment(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: InventoryAdjustmentCreate,
) -> WorkflowResult<InventoryLog> {
    authorize(actor, Operation::AdjustInventory)?;
    if data.quantity == 0 || data.quantity.unsigned_abs() > MAX_BAGS.unsigned_abs() {
        return Err(WorkflowError::validation_code(
            ErrorCode::InvalidAdjustment,
            format!("quantity must be non-zero and at most {MAX_BAGS} in magnitude"),
        ));
    }
    validate_required_text(&data.reason, "reason", MAX_NOTE_LEN)?;

    let log = inventory::create(pool, data.quantity, data.reason.trim(), actor.id).await?;
    tracing::info!(
        inventory_log_id = log.id,
        quantity = log.quantity,
        actor_id = actor.id,
        "Inventory adjusted"
    );
    Ok(log)
}

pub async fn list_adjustments(
    pool: &SqlitePool,
    actor: &CurrentUser,
) -> WorkflowResult<Vec<InventoryLog>> {
    authorize(actor, Operation::ViewInventory)?;
    Ok(inventory::find_all(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::dispatch::{account_driver_sales, dispatch_driver};
    use crate::workflow::packing::{approve_packing_log, confirm_packing_log, create_packing_log};
    use crate::workflow::test_support::{staff, test_pool};
    use shared::models::{
        DriverDispatch, DriverSalesAccount, PackingLogApprove, PackingLogConfirm,
        PackingLogCreate, Role,
    };

    fn adjustment(quantity: i64, reason: &str) -> InventoryAdjustmentCreate {
        InventoryAdjustmentCreate {
            quantity,
            reason: reason.into(),
        }
    }

    #[tokio::test]
    async fn test_stock_follows_production_and_sales() {
        let pool = test_pool().await;
        let keeper = staff(&pool, "keeper", Role::StoreKeeper).await;
        let packer = staff(&pool, "packer", Role::Packer).await;
        let manager = staff(&pool, "manager", Role::Manager).await;
        let desk = staff(&pool, "desk", Role::Receptionist).await;
        let driver = staff(&pool, "driver", Role::Driver).await;

        let log = create_packing_log(
            &pool,
            &keeper,
            PackingLogCreate {
                packer_id: packer.id,
                bags_packed: 300,
                packing_date: "2025-03-01".into(),
                storekeeper_notes: None,
                assignment_id: None,
            },
        )
        .await
        .unwrap();
        confirm_packing_log(&pool, &packer, log.id, PackingLogConfirm::default()).await.unwrap();
        approve_packing_log(&pool, &manager, log.id, PackingLogApprove::default()).await.unwrap();

        let run = dispatch_driver(
            &pool,
            &desk,
            DriverDispatch {
                driver_id: driver.id,
                driver_assistant_id: None,
                bags_dispatched: 100,
                delivery_date: "2025-03-02".into(),
                driver_notes: None,
            },
        )
        .await
        .unwrap();
        account_driver_sales(
            &pool,
            &desk,
            run.id,
            DriverSalesAccount {
                bags_sold_270: 40,
                bags_sold_250: 55,
                bags_returned: 5,
                total_revenue: 24_550.0,
                receptionist_notes: None,
            },
        )
        .await
        .unwrap();
        record_adjustment(&pool, &keeper, adjustment(-10, "burst bags")).await.unwrap();

        let snapshot = compute_current_inventory(&pool, &manager).await.unwrap();
        assert_eq!(snapshot.bags_produced, 300);
        assert_eq!(snapshot.bags_dispatched, 100);
        assert_eq!(snapshot.bags_returned, 5);
        assert_eq!(snapshot.adjustments, -10);
        assert_eq!(snapshot.current_stock, 195);
    }

    #[tokio::test]
    async fn test_adjustment_rules() {
        let pool = test_pool().await;
        let keeper = staff(&pool, "keeper", Role::StoreKeeper).await;
        let packer = staff(&pool, "packer", Role::Packer).await;

        let err = record_adjustment(&pool, &keeper, adjustment(0, "noop")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidAdjustment);
        for quantity in [i64::MIN, i64::MAX, MAX_BAGS + 1, -(MAX_BAGS + 1)] {
            let err = record_adjustment(&pool, &keeper, adjustment(quantity, "miscount"))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidAdjustment);
        }
        assert!(list_adjustments(&pool, &keeper).await.unwrap().is_empty());
        record_adjustment(&pool, &keeper, adjustment(-MAX_BAGS, "written off")).await.unwrap();

        let err = record_adjustment(&pool, &keeper, adjustment(5, "  ")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::RequiredField);
        let err = record_adjustment(&pool, &packer, adjustment(5, "found")).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden { .. }));

        record_adjustment(&pool, &keeper, adjustment(5, "found")).await.unwrap();
        assert_eq!(list_adjustments(&pool, &keeper).await.unwrap().len(), 2);
    }
}
