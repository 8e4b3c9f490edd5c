use shared::models::{OrderStatus, OrderUpdate, PaymentStatus, RevenuePeriod, RevenuePoint};
use sqlx::SqlitePool;

use super::*;
use crate::db::test_pool;
use crate::orders::OrderManager;
use crate::test_support::*;

const DAY: i64 = 86_400_000;
// 2024-01-01T00:00:00Z
const JAN_1: i64 = 1_704_067_200_000;

struct Fixture {
    pool: SqlitePool,
    orders: OrderManager,
    analytics: Analytics,
    workspace: i64,
    store: i64,
    product: i64,
}

async fn fixture() -> Fixture {
    let pool = test_pool().await;
    let workspace = seed_workspace(&pool, 1_000, 100, 10).await;
    let store = seed_store(&pool, workspace).await;
    let product = seed_product(&pool, store, "Tee", 2_500, 0, false).await;
    Fixture {
        orders: OrderManager::new(pool.clone()),
        analytics: Analytics::new(pool.clone()),
        pool,
        workspace,
        store,
        product,
    }
}

impl Fixture {
    async fn order(&self, store: i64, product: i64, price: i64, at: i64, paid: bool) -> i64 {
        let order = self
            .orders
            .create(self.workspace, order_input(store, &[(product, 1, price)]), at)
            .await
            .unwrap();
        if paid {
            self.orders
                .update(
                    self.workspace,
                    order.id,
                    OrderUpdate {
                        payment_status: Some(PaymentStatus::Paid),
                        ..Default::default()
                    },
                    at,
                )
                .await
                .unwrap();
        }
        order.id
    }
}

#[tokio::test]
async fn test_revenue_over_time_daily_example() {
    let f = fixture().await;
    f.order(f.store, f.product, 1_000, JAN_1 + 3_600_000, true).await;
    f.order(f.store, f.product, 500, JAN_1 + 7_200_000, false).await;
    f.order(f.store, f.product, 2_000, JAN_1 + DAY + 60_000, true).await;
    // Outside the requested range
    f.order(f.store, f.product, 9_000, JAN_1 + 2 * DAY, true).await;

    let query = RevenueQuery {
        start_date: Some("2024-01-01".into()),
        end_date: Some("2024-01-02".into()),
        ..Default::default()
    };
    let series = f
        .analytics
        .revenue_over_time(f.workspace, &query, JAN_1 + 10 * DAY)
        .await
        .unwrap();
    assert_eq!(
        series,
        vec![
            RevenuePoint {
                date: "2024-01-01".into(),
                revenue: 1_000,
                orders: 2
            },
            RevenuePoint {
                date: "2024-01-02".into(),
                revenue: 2_000,
                orders: 1
            },
        ]
    );

    let weekly = f
        .analytics
        .revenue_over_time(
            f.workspace,
            &RevenueQuery {
                start_date: Some("2024-01-01".into()),
                end_date: Some("2024-01-07".into()),
                period: RevenuePeriod::Week,
                ..Default::default()
            },
            JAN_1 + 10 * DAY,
        )
        .await
        .unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].date, "2023-12-31");
    assert_eq!(weekly[0].orders, 4);
    assert_eq!(weekly[0].revenue, 12_000);
}

#[tokio::test]
async fn test_revenue_over_time_rejects_inverted_range() {
    let f = fixture().await;
    let query = RevenueQuery {
        start_date: Some("2024-03-01".into()),
        end_date: Some("2024-01-01".into()),
        ..Default::default()
    };
    assert!(matches!(
        f.analytics.revenue_over_time(f.workspace, &query, JAN_1).await,
        Err(AnalyticsError::InvalidRange(_))
    ));
}

#[tokio::test]
async fn test_dashboard_deltas() {
    let f = fixture().await;
    let now = JAN_1 + 90 * DAY;

    // Previous window: 2 orders, 1_000 paid
    f.order(f.store, f.product, 1_000, now - 45 * DAY, true).await;
    f.order(f.store, f.product, 700, now - 40 * DAY, false).await;
    // Current window: 3 orders, 1_500 paid
    f.order(f.store, f.product, 500, now - 10 * DAY, true).await;
    f.order(f.store, f.product, 1_000, now - DAY, true).await;
    f.order(f.store, f.product, 300, now, false).await;
    // Older than both windows
    f.order(f.store, f.product, 4_000, now - 80 * DAY, true).await;

    let stats = f.analytics.dashboard_stats(f.workspace, None, now).await.unwrap();
    assert_eq!(stats.total_stores, 1);
    assert_eq!(stats.total_products, 1);
    assert_eq!(stats.total_orders, 6);
    assert_eq!(stats.total_revenue, 1_000 + 500 + 1_000 + 4_000);
    assert_eq!(stats.orders_change, 50.0);
    assert_eq!(stats.revenue_change, 50.0);
}

#[tokio::test]
async fn test_empty_workspace_degrades_to_zero() {
    let f = fixture().await;
    let now = JAN_1;

    let stats = f.analytics.dashboard_stats(f.workspace, None, now).await.unwrap();
    assert_eq!(stats.total_orders, 0);
    assert_eq!(stats.total_revenue, 0);
    assert_eq!(stats.orders_change, 0.0);
    assert_eq!(stats.revenue_change, 0.0);

    assert!(f.analytics.orders_by_status(f.workspace, None).await.unwrap().is_empty());
    let sales = f.analytics.sales_by_store(f.workspace).await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].percentage, 0);
    assert!(
        f.analytics
            .revenue_over_time(f.workspace, &RevenueQuery::default(), now)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_orders_by_status() {
    let f = fixture().await;
    let mut ids = Vec::new();
    for i in 0..3 {
        ids.push(f.order(f.store, f.product, 100, JAN_1 + i, false).await);
    }
    f.orders
        .update(
            f.workspace,
            ids[0],
            OrderUpdate {
                status: Some(OrderStatus::Completed),
                ..Default::default()
            },
            JAN_1 + 10,
        )
        .await
        .unwrap();

    let breakdown = f.analytics.orders_by_status(f.workspace, None).await.unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].status, OrderStatus::Pending);
    assert_eq!(breakdown[0].count, 2);
    assert_eq!(breakdown[0].percentage, 67);
    assert_eq!(breakdown[1].status, OrderStatus::Completed);
    assert_eq!(breakdown[1].percentage, 33);
}

#[tokio::test]
async fn test_top_products_and_customers() {
    let f = fixture().await;
    let mug = seed_product(&f.pool, f.store, "Mug", 1_200, 10, true).await;
    let cap = seed_product(&f.pool, f.store, "Cap", 900, 10, true).await;
    set_sales(&f.pool, f.product, 2).await;
    set_sales(&f.pool, mug, 7).await;
    set_sales(&f.pool, cap, 4).await;

    let top = f
        .analytics
        .top_products(
            f.workspace,
            &ReportQuery {
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        top.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Mug", "Cap"]
    );
    assert_eq!(top[0].revenue, 1_200 * 7);
    assert_eq!(top[0].store_name, "Main Street");

    // Revenue follows the current catalog price
    crate::db::repository::product::update_price(&f.pool, mug, 1_000, JAN_1)
        .await
        .unwrap();
    let top = f
        .analytics
        .top_products(f.workspace, &ReportQuery::default())
        .await
        .unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].revenue, 7_000);

    seed_customer(&f.pool, f.store, "Ada", 3, 12_000).await;
    seed_customer(&f.pool, f.store, "Grace", 9, 45_000).await;
    seed_customer(&f.pool, f.store, "Linus", 1, 800).await;
    let customers = f
        .analytics
        .top_customers(
            f.workspace,
            &ReportQuery {
                store_id: Some(f.store),
                limit: Some(2),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        customers.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Grace", "Ada"]
    );
    assert_eq!(customers[0].total_spent, 45_000);
}

#[tokio::test]
async fn test_sales_by_store_share() {
    let f = fixture().await;
    let second = seed_store(&f.pool, f.workspace).await;
    let cap = seed_product(&f.pool, second, "Cap", 900, 0, false).await;
    seed_product(&f.pool, second, "Scarf", 900, 0, false).await;

    f.order(f.store, f.product, 3_000, JAN_1, false).await;
    f.order(second, cap, 1_000, JAN_1, false).await;

    let sales = f.analytics.sales_by_store(f.workspace).await.unwrap();
    assert_eq!(sales.len(), 2);
    assert_eq!(sales[0].store_id, f.store);
    assert_eq!(sales[0].revenue, 3_000);
    assert_eq!(sales[0].orders, 1);
    assert_eq!(sales[0].products, 1);
    assert_eq!(sales[0].percentage, 75);
    assert_eq!(sales[1].products, 2);
    assert_eq!(sales[1].percentage, 25);
}

#[tokio::test]
async fn test_recent_orders() {
    let f = fixture().await;
    for i in 0..7 {
        f.order(f.store, f.product, 100 + i, JAN_1 + i * 1_000, false).await;
    }

    let recent = f
        .analytics
        .recent_orders(f.workspace, &ReportQuery::default())
        .await
        .unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].total, 106);
    assert_eq!(recent[0].customer_name, "Ada");
    assert_eq!(recent[0].store_name, "Main Street");
    assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn test_store_filter_is_workspace_scoped() {
    let f = fixture().await;
    let other_workspace = seed_workspace(&f.pool, 10, 10, 10).await;
    let foreign_store = seed_store(&f.pool, other_workspace).await;

    assert!(matches!(
        f.analytics
            .dashboard_stats(f.workspace, Some(foreign_store), JAN_1)
            .await,
        Err(AnalyticsError::StoreNotFound(_))
    ));
    assert!(matches!(
        f.analytics
            .recent_orders(
                f.workspace,
                &ReportQuery {
                    store_id: Some(foreign_store),
                    limit: None
                }
            )
            .await,
        Err(AnalyticsError::StoreNotFound(_))
    ));

    // Another workspace's data never shows up
    f.order(f.store, f.product, 100, JAN_1, true).await;
    let stats = f
        .analytics
        .dashboard_stats(other_workspace, None, JAN_1)
        .await
        .unwrap();
    assert_eq!(stats.total_orders, 0);
    assert_eq!(stats.total_stores, 1);
}
