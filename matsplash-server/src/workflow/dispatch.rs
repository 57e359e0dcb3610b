//! Driver dispatch and settlement
//!
//! The receptionist dispatches a driver with bags, then accounts the run
//! when the driver returns. The submitted revenue is stored as given; the
//! server recomputes it from the bag counts and reports any mismatch.

use shared::error::ErrorCode;
use shared::models::{
    DriverDispatch, DriverSalesAccount, DriverSalesLog, DriverSalesQuery, DriverSalesSettlement,
    DriverSalesStatus, Role,
};
use sqlx::SqlitePool;

use super::{WorkflowError, WorkflowResult, money, require_staff};
use crate::auth::policy::sees_all_records;
use crate::auth::{CurrentUser, Operation, authorize};
use crate::db::repository::driver_sales::{self, NewDispatch, Settlement};
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_bag_count, validate_date, validate_optional_text,
    validate_positive_bags,
};

async fn find_log(pool: &SqlitePool, id: i64) -> WorkflowResult<DriverSalesLog> {
    driver_sales::find_by_id(pool, id).await?.ok_or_else(|| {
        WorkflowError::not_found(
            ErrorCode::DriverSalesNotFound,
            format!("Driver sales log {id} not found"),
        )
    })
}

pub async fn dispatch_driver(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: DriverDispatch,
) -> WorkflowResult<DriverSalesLog> {
    authorize(actor, Operation::DispatchDriver)?;
    validate_positive_bags(data.bags_dispatched, "bags_dispatched")?;
    validate_date(&data.delivery_date, "delivery_date")?;
    validate_optional_text(&data.driver_notes, "driver_notes", MAX_NOTE_LEN)?;
    require_staff(pool, data.driver_id, &[Role::Driver], "driver_id").await?;
    if let Some(assistant_id) = data.driver_assistant_id {
        if assistant_id == data.driver_id {
            return Err(WorkflowError::validation(
                "driver_assistant_id must differ from driver_id",
            ));
        }
        require_staff(
            pool,
            assistant_id,
            &[Role::DriverAssistant],
            "driver_assistant_id",
        )
        .await?;
    }

    let log = driver_sales::create(
        pool,
        NewDispatch {
            driver_id: data.driver_id,
            driver_assistant_id: data.driver_assistant_id,
            bags_dispatched: data.bags_dispatched,
            expected_revenue: money::expected_revenue(data.bags_dispatched),
            delivery_date: &data.delivery_date,
            receptionist_id: actor.id,
            driver_notes: data.driver_notes.as_deref(),
        },
    )
    .await?;
    tracing::info!(
        driver_sales_id = log.id,
        driver_id = log.driver_id,
        bags = log.bags_dispatched,
        expected_revenue = log.expected_revenue,
        "Driver dispatched"
    );
    Ok(log)
}

/// Cross-check a settlement; returns (computed revenue, unaccounted bags, warnings)
fn reconcile(log: &DriverSalesLog, data: &DriverSalesAccount) -> (f64, i64, Vec<String>) {
    let computed = money::sales_revenue(data.bags_sold_270, data.bags_sold_250);
    let unaccounted =
        log.bags_dispatched - data.bags_sold_270 - data.bags_sold_250 - data.bags_returned;

    let mut warnings = Vec::new();
    if money::differs(data.total_revenue, computed) {
        warnings.push(format!(
            "Submitted revenue {:.2} differs from computed revenue {:.2}",
            data.total_revenue, computed
        ));
    }
    if unaccounted > 0 {
        warnings.push(format!(
            "{unaccounted} of {} dispatched bags are neither sold nor returned",
            log.bags_dispatched
        ));
    }
    (computed, unaccounted, warnings)
}

pub async fn account_driver_sales(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: DriverSalesAccount,
) -> WorkflowResult<DriverSalesSettlement> {
    authorize(actor, Operation::AccountDriverSales)?;
    validate_bag_count(data.bags_sold_270, "bags_sold_270")?;
    validate_bag_count(data.bags_sold_250, "bags_sold_250")?;
    validate_bag_count(data.bags_returned, "bags_returned")?;
    validate_optional_text(&data.receptionist_notes, "receptionist_notes", MAX_NOTE_LEN)?;
    if !money::is_valid_amount(data.total_revenue) {
        return Err(WorkflowError::validation_code(
            ErrorCode::InvalidRevenue,
            format!("total_revenue must be a non-negative amount, got {}", data.total_revenue),
        ));
    }

    let current = find_log(pool, id).await?;
    if current.status != DriverSalesStatus::Dispatched {
        return Err(WorkflowError::invalid_state(format!(
            "Driver sales log {id} is already {}",
            current.status.as_str()
        )));
    }
    let reported = data.bags_sold_270 + data.bags_sold_250 + data.bags_returned;
    if reported > current.bags_dispatched {
        return Err(WorkflowError::validation_code(
            ErrorCode::SalesExceedDispatched,
            format!(
                "Sold and returned bags ({reported}) exceed dispatched bags ({})",
                current.bags_dispatched
            ),
        ));
    }

    let (computed_revenue, unaccounted_bags, warnings) = reconcile(&current, &data);
    let rows = driver_sales::account(
        pool,
        id,
        Settlement {
            bags_sold_270: data.bags_sold_270,
            bags_sold_250: data.bags_sold_250,
            bags_returned: data.bags_returned,
            total_revenue: money::to_f64(money::to_decimal(data.total_revenue)),
            receptionist_id: actor.id,
            receptionist_notes: data.receptionist_notes.as_deref(),
        },
    )
    .await?;
    if rows == 0 {
        return Err(WorkflowError::conflict(format!(
            "Driver sales log {id} was modified concurrently"
        )));
    }

    if !warnings.is_empty() {
        tracing::warn!(
            driver_sales_id = id,
            submitted = data.total_revenue,
            computed = computed_revenue,
            unaccounted = unaccounted_bags,
            "Driver settlement mismatch"
        );
    }
    tracing::info!(driver_sales_id = id, receptionist_id = actor.id, "Driver sales accounted");

    Ok(DriverSalesSettlement {
        log: find_log(pool, id).await?,
        computed_revenue,
        unaccounted_bags,
        warnings,
    })
}

/// Drivers and assistants only see runs they were on
pub async fn list_driver_sales(
    pool: &SqlitePool,
    actor: &CurrentUser,
    query: DriverSalesQuery,
) -> WorkflowResult<Vec<DriverSalesLog>> {
    authorize(actor, Operation::ViewDriverSales)?;
    let crew_member = if sees_all_records(actor) {
        query.driver_id
    } else {
        Some(actor.id)
    };
    Ok(driver_sales::find_all(pool, query.status, crew_member).await?)
}
