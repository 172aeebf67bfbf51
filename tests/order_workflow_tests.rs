mod common;

use gastrobar_backend::{
    entities::customer_orders::OrderStatus,
    error::ErrorKind,
    models::{menu_item::MenuItemRequest, order::CreateOrderDetailRequest},
    services::{
        line_items::{self, LineItemChange},
        menu_catalog, order_ledger, order_workflow, table_registry,
    },
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::common::{seed_menu_item, seed_table, setup_test_db};

fn attach(table_id: i32, menu_item_id: i32, quantity: i32, order_id: Option<i32>) -> CreateOrderDetailRequest {
    CreateOrderDetailRequest {
        order_id,
        table_id,
        menu_item_id,
        quantity,
    }
}

#[tokio::test]
async fn test_first_attach_opens_order_and_second_without_order_id_conflicts() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 5).await;

    let line = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 2, None))
        .await
        .unwrap();

    assert_eq!(line.detail.quantity, 2);
    let snapshot = line.menu_item.expect("line item carries its menu item");
    assert_eq!(snapshot.id, burger.id);

    let order = order_ledger::find_order(&db, line.detail.order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.table_id, table.id);
    assert_eq!(order.total_amount, dec!(25.00));

    let err = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 1, None))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.to_string().contains("pending customer order already exists"));

    // Passing the pending order explicitly attaches to it
    let second = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 1, Some(order.id)))
        .await
        .unwrap();
    assert_eq!(second.detail.order_id, order.id);

    let with_details = order_workflow::get_order_with_details(&db, order.id).await.unwrap();
    assert_eq!(with_details.details.len(), 2);
    assert_eq!(with_details.order.total_amount, dec!(37.50));
}

#[tokio::test]
async fn test_insufficient_stock_persists_nothing() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 5).await;

    let err = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 10, None))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientStock);
    let message = err.to_string();
    assert!(message.contains("Burger"));
    assert!(message.contains(&format!("ID: {}", burger.id)));
    assert!(message.contains("Available: 5"));
    assert!(message.contains("Requested: 10"));

    // The order opened inside the failed transaction is gone too
    let pending = order_ledger::find_pending_by_table(&db, table.id).await.unwrap();
    assert!(pending.is_none());
    let item = menu_catalog::find_menu_item(&db, burger.id).await.unwrap();
    assert_eq!(item.stock, 5);
}

#[tokio::test]
async fn test_complete_order_once() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 5).await;

    let line = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 1, None))
        .await
        .unwrap();
    let order_id = line.detail.order_id;

    let completed = order_workflow::complete_order(&db, order_id).await.unwrap();
    assert_eq!(completed.order.status, OrderStatus::Completed);
    assert_eq!(completed.details.len(), 1);

    let err = order_workflow::complete_order(&db, order_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(err.to_string(), "order is not in 'pending' state");

    let err = order_workflow::complete_order(&db, 9999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_completed_order_is_frozen_and_table_can_reopen() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 10).await;

    let line = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 2, None))
        .await
        .unwrap();
    let order_id = line.detail.order_id;
    order_workflow::complete_order(&db, order_id).await.unwrap();

    let err = line_items::update_line_item(
        &db,
        LineItemChange {
            id: line.detail.id,
            order_id,
            menu_item_id: burger.id,
            quantity: 3,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let err = line_items::delete_line_item(&db, line.detail.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let err = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 1, Some(order_id)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    // Stock untouched by the rejected mutations
    let item = menu_catalog::find_menu_item(&db, burger.id).await.unwrap();
    assert_eq!(item.stock, 8);

    // A completed order frees the table for a new one
    let next = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 1, None))
        .await
        .unwrap();
    assert_ne!(next.detail.order_id, order_id);

    let last_completed = order_ledger::find_completed_by_table(&db, table.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(last_completed.id, order_id);
}

#[tokio::test]
async fn test_order_from_another_table_is_rejected() {
    let db = setup_test_db().await.unwrap();
    let t1 = seed_table(&db, "T1").await;
    let t2 = seed_table(&db, "T2").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 10).await;

    let line = order_workflow::attach_line_item(&db, attach(t1.id, burger.id, 1, None))
        .await
        .unwrap();

    let err = order_workflow::attach_line_item(&db, attach(t2.id, burger.id, 1, Some(line.detail.order_id)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        err.to_string(),
        "customer order does not belong to the specified table"
    );
}

#[tokio::test]
async fn test_missing_references_are_not_found() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 10).await;

    let err = order_workflow::attach_line_item(&db, attach(42, burger.id, 1, None))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = order_workflow::attach_line_item(&db, attach(table.id, 42, 1, None))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 1, Some(42)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = order_workflow::pending_order_for_table(&db, table.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = line_items::get_line_items_by_order(&db, 42).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_stock_follows_line_item_changes() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 10).await;
    let fries = seed_menu_item(&db, "Fries", dec!(3.25), 4).await;

    let line = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 3, None))
        .await
        .unwrap();
    let order_id = line.detail.order_id;
    assert_eq!(menu_catalog::find_menu_item(&db, burger.id).await.unwrap().stock, 7);

    // Raising the quantity only takes the difference
    let updated = line_items::update_line_item(
        &db,
        LineItemChange {
            id: line.detail.id,
            order_id,
            menu_item_id: burger.id,
            quantity: 5,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.detail.quantity, 5);
    assert_eq!(menu_catalog::find_menu_item(&db, burger.id).await.unwrap().stock, 5);
    assert_eq!(order_ledger::find_order(&db, order_id).await.unwrap().total_amount, dec!(62.50));

    // More fries than exist: nothing moves
    let err = line_items::update_line_item(
        &db,
        LineItemChange {
            id: line.detail.id,
            order_id,
            menu_item_id: fries.id,
            quantity: 5,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);
    assert_eq!(menu_catalog::find_menu_item(&db, burger.id).await.unwrap().stock, 5);

    // Switching item releases the old reservation
    line_items::update_line_item(
        &db,
        LineItemChange {
            id: line.detail.id,
            order_id,
            menu_item_id: fries.id,
            quantity: 4,
        },
    )
    .await
    .unwrap();
    assert_eq!(menu_catalog::find_menu_item(&db, burger.id).await.unwrap().stock, 10);
    assert_eq!(menu_catalog::find_menu_item(&db, fries.id).await.unwrap().stock, 0);
    assert_eq!(order_ledger::find_order(&db, order_id).await.unwrap().total_amount, dec!(13.00));

    line_items::delete_line_item(&db, line.detail.id).await.unwrap();
    assert_eq!(menu_catalog::find_menu_item(&db, fries.id).await.unwrap().stock, 4);
    assert_eq!(order_ledger::find_order(&db, order_id).await.unwrap().total_amount, Decimal::ZERO);

    let err = line_items::get_line_item(&db, line.detail.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_line_item_moves_between_pending_orders() {
    let db = setup_test_db().await.unwrap();
    let t1 = seed_table(&db, "T1").await;
    let t2 = seed_table(&db, "T2").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 10).await;

    let first = order_workflow::attach_line_item(&db, attach(t1.id, burger.id, 2, None))
        .await
        .unwrap();
    let other = order_workflow::attach_line_item(&db, attach(t2.id, burger.id, 1, None))
        .await
        .unwrap();

    let moved = line_items::update_line_item(
        &db,
        LineItemChange {
            id: first.detail.id,
            order_id: other.detail.order_id,
            menu_item_id: burger.id,
            quantity: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.detail.order_id, other.detail.order_id);

    let source = order_ledger::find_order(&db, first.detail.order_id).await.unwrap();
    let target = order_ledger::find_order(&db, other.detail.order_id).await.unwrap();
    assert_eq!(source.total_amount, Decimal::ZERO);
    assert_eq!(target.total_amount, dec!(37.50));
    assert_eq!(menu_catalog::find_menu_item(&db, burger.id).await.unwrap().stock, 7);

    // A completed target is refused
    order_workflow::complete_order(&db, source.id).await.unwrap();
    let err = line_items::update_line_item(
        &db,
        LineItemChange {
            id: moved.detail.id,
            order_id: source.id,
            menu_item_id: burger.id,
            quantity: 2,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[tokio::test]
async fn test_line_item_input_validation() {
    let db = setup_test_db().await.unwrap();

    let err = line_items::get_line_item(&db, 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = line_items::update_line_item(
        &db,
        LineItemChange {
            id: 1,
            order_id: 1,
            menu_item_id: 1,
            quantity: 0,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = order_workflow::get_order_with_details(&db, -1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_table_registry_limits() {
    let db = setup_test_db().await.unwrap();

    for name in ["T1", "T2", "T3", "T4"] {
        seed_table(&db, name).await;
    }

    let err = table_registry::create_table(&db, "T5").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(err.to_string(), "maximum number of tables reached");

    // Duplicate names are caught before the capacity check
    let err = table_registry::create_table(&db, "T1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = table_registry::create_table(&db, "  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let t1 = table_registry::get_table_by_name(&db, "T1").await.unwrap();
    let renamed = table_registry::update_table(&db, t1.id, "Terrace").await.unwrap();
    assert_eq!(renamed.table_name, "Terrace");

    // Keeping the same name is not a duplicate
    table_registry::update_table(&db, t1.id, "Terrace").await.unwrap();

    let err = table_registry::update_table(&db, t1.id, "T2").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(table_registry::count_tables(&db).await.unwrap(), 4);

    let err = table_registry::get_table_by_name(&db, "T1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_referenced_menu_item_cannot_be_deleted() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 10).await;
    let salad = seed_menu_item(&db, "Salad", dec!(8.00), 10).await;

    order_workflow::attach_line_item(&db, attach(table.id, burger.id, 1, None))
        .await
        .unwrap();

    let err = menu_catalog::delete_menu_item(&db, burger.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    menu_catalog::delete_menu_item(&db, salad.id).await.unwrap();
    let err = menu_catalog::delete_menu_item(&db, salad.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_store_allows_one_pending_order_per_table() {
    let db = setup_test_db().await.unwrap();
    let t1 = seed_table(&db, "T1").await;
    let t2 = seed_table(&db, "T2").await;

    let first = order_ledger::create_order(&db, t1.id).await.unwrap();
    assert_eq!(first.status, OrderStatus::Pending);
    assert_eq!(first.total_amount, Decimal::ZERO);

    // Bypasses the workflow's pending check; the unique index still refuses
    let err = order_ledger::create_order(&db, t1.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), order_ledger::PENDING_ORDER_EXISTS);

    // Other tables are unaffected
    order_ledger::create_order(&db, t2.id).await.unwrap();

    order_ledger::complete_order(&db, first.id).await.unwrap();
    let reopened = order_ledger::create_order(&db, t1.id).await.unwrap();
    assert_ne!(reopened.id, first.id);
    assert_eq!(reopened.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_restoring_stock_past_the_maximum_is_rejected() {
    let db = setup_test_db().await.unwrap();
    let table = seed_table(&db, "T1").await;
    let burger = seed_menu_item(&db, "Burger", dec!(12.50), 10).await;

    let line = order_workflow::attach_line_item(&db, attach(table.id, burger.id, 5, None))
        .await
        .unwrap();

    menu_catalog::update_menu_item(
        &db,
        burger.id,
        MenuItemRequest {
            item_name: burger.item_name.clone(),
            category: burger.category.clone(),
            price: burger.price,
            stock: i32::MAX,
            description: burger.description.clone(),
        },
    )
    .await
    .unwrap();

    let err = line_items::delete_line_item(&db, line.detail.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // Nothing moved
    let item = menu_catalog::find_menu_item(&db, burger.id).await.unwrap();
    assert_eq!(item.stock, i32::MAX);
    line_items::get_line_item(&db, line.detail.id).await.unwrap();

    // Same on the update path when switching away from the item
    let fries = seed_menu_item(&db, "Fries", dec!(3.25), 10).await;
    let err = line_items::update_line_item(
        &db,
        LineItemChange {
            id: line.detail.id,
            order_id: line.detail.order_id,
            menu_item_id: fries.id,
            quantity: 1,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(menu_catalog::find_menu_item(&db, fries.id).await.unwrap().stock, 10);
}
