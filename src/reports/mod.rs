//! Reporting aggregator: read-only statistics over the order collection.

use crate::clients::CollectionView;
use crate::error::ServiceError;
use crate::model::{MenuItem, Order, PopularItem, TotalPrice};
use crate::order_actor::pricing::total_price;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Derives sales statistics. Never mutates any collection.
#[derive(Clone)]
pub struct ReportService {
    orders: Arc<dyn CollectionView<Order>>,
    menu: Arc<dyn CollectionView<MenuItem>>,
}

impl ReportService {
    pub fn new(orders: Arc<dyn CollectionView<Order>>, menu: Arc<dyn CollectionView<MenuItem>>) -> Self {
        Self { orders, menu }
    }

    /// Revenue over every order, open or closed, priced at the current menu.
    #[instrument(skip(self))]
    pub async fn total_sales(&self) -> Result<TotalPrice, ServiceError> {
        let orders = self.orders.load_all().await?;
        let menu = self.menu.load_all().await?;
        let total_sales: f64 = orders
            .values()
            .map(|order| total_price(&order.items, &menu).total_sales)
            .sum();
        debug!(orders = orders.len(), total_sales, "Computed total sales");
        Ok(TotalPrice { total_sales })
    }

    /// The single best-selling product.
    ///
    /// Ties go to the lexicographically smallest product ID.
    ///
    /// # Errors
    /// `NotFound` when no order contains any item.
    #[instrument(skip(self))]
    pub async fn popular_items(&self) -> Result<Vec<PopularItem>, ServiceError> {
        let orders = self.orders.load_all().await?;
        let sold = units_sold(orders.values());
        let (item_name, quantity_of_sales) = sold
            .into_iter()
            .max_by_key(|(id, quantity)| (*quantity, Reverse(id.clone())))
            .ok_or_else(|| ServiceError::NotFound("no ordered items".into()))?;
        Ok(vec![PopularItem {
            item_name,
            quantity_of_sales,
        }])
    }
}

fn units_sold<'a>(orders: impl Iterator<Item = &'a Order>) -> BTreeMap<String, u64> {
    let mut sold = BTreeMap::new();
    for item in orders.flat_map(|order| &order.items) {
        *sold.entry(item.product_id.clone()).or_insert(0) += u64::from(item.quantity);
    }
    sold
}
