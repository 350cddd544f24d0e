//! # Order Repository
//!
//! All order persistence, from checkout submission to admin management.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderRepository                                  │
//! │                                                                         │
//! │  create(new_order)      ─► idempotency check ─► tx: order + items       │
//! │  get(id)                ─► row + hydrated items                         │
//! │  list(page, page_size)  ─► COUNT + newest-first page                    │
//! │  update_status(id, to)  ─► state machine check ─► guarded UPDATE        │
//! │  delete(id)             ─► tx: items then order                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transactions
//! An order and its items are written in one transaction. A failure on any
//! item rolls back the whole submission; a half-written order never exists.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use opaline_core::pagination::total_pages_for;
use opaline_core::{NewOrder, Order, OrderItem, OrderPage, OrderStatus};

use crate::error::{DbError, DbResult};

/// Columns selected whenever a full order row is fetched.
const ORDER_COLUMNS: &str = "id, order_number, status, payment_method, first_name, last_name, \
     email, phone, address, city, country, postal_code, total_cents, created_at, updated_at";

/// Repository for order CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Persists a checkout submission as a new order.
    ///
    /// ## Behavior
    /// 1. If the payload carries an idempotency key already on file, the
    ///    stored order is returned and nothing is written (duplicate retry).
    /// 2. Otherwise the order and all its items are inserted in one
    ///    transaction with a fresh UUID and a generated order number.
    ///
    /// The caller is expected to have validated the payload and verified the
    /// total; this method only persists.
    ///
    /// ## Returns
    /// The stored order with items hydrated, whether fresh or replayed.
    pub async fn create(&self, new_order: &NewOrder) -> DbResult<Order> {
        if let Some(key) = &new_order.idempotency_key {
            if let Some(existing) = self.find_by_idempotency_key(key).await? {
                info!(
                    order_id = %existing.id,
                    "Duplicate submission replayed from idempotency key"
                );
                return Ok(existing);
            }
        }

        let order_id = Uuid::new_v4().to_string();
        let order_number = generate_order_number();
        let now = Utc::now();

        debug!(%order_id, %order_number, "Creating order");

        let mut tx = self.pool.begin().await?;

        let insert = sqlx::query(
            "INSERT INTO orders (id, order_number, status, payment_method, first_name, \
             last_name, email, phone, address, city, country, postal_code, total_cents, \
             idempotency_key, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order_id)
        .bind(&order_number)
        .bind(OrderStatus::Pending)
        .bind(new_order.payment_method)
        .bind(&new_order.first_name)
        .bind(&new_order.last_name)
        .bind(&new_order.email)
        .bind(&new_order.phone)
        .bind(&new_order.address)
        .bind(&new_order.city)
        .bind(&new_order.country)
        .bind(&new_order.postal_code)
        .bind(new_order.total_cents)
        .bind(&new_order.idempotency_key)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await;

        if let Err(err) = insert {
            let err = DbError::from(err);

            // Two submissions can race past the pre-check; the UNIQUE column
            // is the authority. Surface the stored order, not an error.
            if let (DbError::UniqueViolation { field, .. }, Some(key)) =
                (&err, &new_order.idempotency_key)
            {
                if field.contains("idempotency_key") {
                    drop(tx);
                    if let Some(existing) = self.find_by_idempotency_key(key).await? {
                        return Ok(existing);
                    }
                }
            }

            return Err(err);
        }

        for item in &new_order.order_items {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, product_id, name, quantity, \
                 price_cents, image_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order_id)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.price_cents)
            .bind(&item.image_url)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(%order_id, %order_number, total_cents = new_order.total_cents, "Order created");

        self.get(&order_id).await
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Fetches one order with its items.
    ///
    /// ## Returns
    /// * `Ok(Order)` - Found
    /// * `Err(DbError::NotFound)` - No order with this ID
    pub async fn get(&self, id: &str) -> DbResult<Order> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))?;

        self.hydrate(order).await
    }

    /// Looks up an order by its idempotency key, if any order carries it.
    pub async fn find_by_idempotency_key(&self, key: &str) -> DbResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE idempotency_key = ?");

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match order {
            Some(order) => Ok(Some(self.hydrate(order).await?)),
            None => Ok(None),
        }
    }

    /// Lists orders newest-first, paginated.
    ///
    /// ## Behavior
    /// - Ordering is `created_at DESC, id DESC`; a fresh submission appears
    ///   at the top of page 1
    /// - `page` is clamped into `[1, max(1, total_pages)]`
    /// - `total_pages = ceil(total_orders / page_size)`
    pub async fn list(&self, page: i64, page_size: i64) -> DbResult<OrderPage> {
        let page_size = page_size.max(1);

        let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        let total_pages = total_pages_for(total_orders, page_size);
        let page = page.clamp(1, total_pages.max(1));
        let offset = (page - 1) * page_size;

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query_as::<_, Order>(&sql)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for order in rows {
            orders.push(self.hydrate(order).await?);
        }

        debug!(page, page_size, total_orders, "Listed orders");

        Ok(OrderPage {
            orders,
            total_orders,
            total_pages,
        })
    }

    // =========================================================================
    // Status Transitions
    // =========================================================================

    /// Moves an order to a new status, enforcing the lifecycle state machine.
    ///
    /// ## Behavior
    /// The stored status is the authority: the transition is checked against
    /// it, and the UPDATE is guarded with `WHERE status = ?` so a concurrent
    /// change between read and write cannot slip an illegal move through.
    ///
    /// ## Returns
    /// * `Ok(Order)` - Updated order
    /// * `Err(DbError::IllegalTransition)` - The state machine forbids it
    /// * `Err(DbError::NotFound)` - No order with this ID
    pub async fn update_status(&self, id: &str, new_status: OrderStatus) -> DbResult<Order> {
        let current = self.get(id).await?;

        current.status.transition_to(new_status)?;

        let result = sqlx::query(
            "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(new_status)
        .bind(Utc::now())
        .bind(id)
        .bind(current.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Status moved under us; re-read and report against the truth.
            let actual = self.get(id).await?;
            return Err(DbError::IllegalTransition {
                from: actual.status,
                to: new_status,
            });
        }

        info!(
            order_id = %id,
            from = ?current.status,
            to = ?new_status,
            "Order status updated"
        );

        self.get(id).await
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Permanently deletes an order and all its items.
    ///
    /// Items are removed explicitly inside the same transaction; the
    /// `ON DELETE CASCADE` foreign key is the backstop.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - No order with this ID
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(order_id = %id, "Order deleted");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Attaches the line items to an order row.
    async fn hydrate(&self, mut order: Order) -> DbResult<Order> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, name, quantity, price_cents, image_url, \
             created_at FROM order_items WHERE order_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(&order.id)
        .fetch_all(&self.pool)
        .await?;

        order.items = items;
        Ok(order)
    }
}

/// Generates a human-readable order number like `OP-20260827-4F2A91C3`.
///
/// Date plus an 8-char random suffix. Uniqueness is enforced by the column
/// constraint; a collision within one day is vanishingly rare.
fn generate_order_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("OP-{}-{}", date, &suffix[..8])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use opaline_core::{NewOrderItem, PaymentMethod};
    use std::time::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn payload(total_cents: i64, items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            total_cents,
            payment_method: PaymentMethod::Cod,
            first_name: "Ada".into(),
            last_name: "Stone".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Gem Street".into(),
            city: "Antwerp".into(),
            country: "BE".into(),
            postal_code: Some("2000".into()),
            idempotency_key: None,
            order_items: items,
        }
    }

    fn item(product_id: &str, price_cents: i64, quantity: i64) -> NewOrderItem {
        NewOrderItem {
            product_id: product_id.into(),
            name: format!("Product {product_id}"),
            quantity,
            price_cents,
            image_url: Some("ring.jpg".into()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let repo = db.orders();

        let created = repo
            .create(&payload(8000, vec![item("p1", 2000, 2), item("p2", 3000, 1)]))
            .await
            .unwrap();

        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.total_cents, 8000);
        assert_eq!(created.items.len(), 2);
        assert!(created.order_number.starts_with("OP-"));

        let fetched = repo.get(&created.id).await.unwrap();
        assert_eq!(fetched.order_number, created.order_number);
        assert_eq!(fetched.subtotal_cents(), 7000);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let db = test_db().await;

        let err = db.orders().get("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_failed_item_rolls_back_whole_order() {
        let db = test_db().await;
        let repo = db.orders();

        // Second item violates the quantity CHECK constraint.
        let result = repo
            .create(&payload(3000, vec![item("p1", 2000, 1), item("p2", 3000, 0)]))
            .await;
        assert!(result.is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_idempotency_key_replays_stored_order() {
        let db = test_db().await;
        let repo = db.orders();

        let mut order = payload(3000, vec![item("p1", 2000, 1)]);
        order.idempotency_key = Some("retry-key-1".into());

        let first = repo.create(&order).await.unwrap();
        let second = repo.create(&order).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.order_number, second.order_number);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paginated() {
        let db = test_db().await;
        let repo = db.orders();

        let mut ids = Vec::new();
        for i in 0..3 {
            let order = repo
                .create(&payload(3000, vec![item(&format!("p{i}"), 2000, 1)]))
                .await
                .unwrap();
            ids.push(order.id);
            // Distinct created_at timestamps keep the ordering observable.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let page1 = repo.list(1, 2).await.unwrap();
        assert_eq!(page1.total_orders, 3);
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.orders.len(), 2);
        assert_eq!(page1.orders[0].id, ids[2]);
        assert_eq!(page1.orders[1].id, ids[1]);

        let page2 = repo.list(2, 2).await.unwrap();
        assert_eq!(page2.orders.len(), 1);
        assert_eq!(page2.orders[0].id, ids[0]);
    }

    #[tokio::test]
    async fn test_list_clamps_out_of_range_page() {
        let db = test_db().await;
        let repo = db.orders();

        repo.create(&payload(3000, vec![item("p1", 2000, 1)]))
            .await
            .unwrap();

        let page = repo.list(99, 10).await.unwrap();
        assert_eq!(page.orders.len(), 1);

        let empty = repo.list(1, 10).await.unwrap();
        assert_eq!(empty.total_pages, 1);
    }

    #[tokio::test]
    async fn test_legal_status_chain() {
        let db = test_db().await;
        let repo = db.orders();

        let order = repo
            .create(&payload(3000, vec![item("p1", 2000, 1)]))
            .await
            .unwrap();

        let order = repo
            .update_status(&order.id, OrderStatus::Processing)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Processing);

        let order = repo
            .update_status(&order.id, OrderStatus::Shipped)
            .await
            .unwrap();
        let order = repo
            .update_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_illegal_transition_rejected_and_not_persisted() {
        let db = test_db().await;
        let repo = db.orders();

        let order = repo
            .create(&payload(3000, vec![item("p1", 2000, 1)]))
            .await
            .unwrap();

        // Pending cannot jump straight to Delivered.
        let err = repo
            .update_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::IllegalTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            }
        ));

        let stored = repo.get(&order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_terminal_status_is_frozen() {
        let db = test_db().await;
        let repo = db.orders();

        let order = repo
            .create(&payload(3000, vec![item("p1", 2000, 1)]))
            .await
            .unwrap();
        repo.update_status(&order.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let err = repo
            .update_status(&order.id, OrderStatus::Processing)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::IllegalTransition { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_order_and_items() {
        let db = test_db().await;
        let repo = db.orders();

        let order = repo
            .create(&payload(8000, vec![item("p1", 2000, 2), item("p2", 3000, 1)]))
            .await
            .unwrap();

        repo.delete(&order.id).await.unwrap();

        let err = repo.get(&order.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(items, 0);

        let err = repo.delete(&order.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_order_number_format() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "OP");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 8);
    }
}
