//! Cart and line item types.

use crate::catalog::{Product, Stock};
use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Line items are unique by product id and keep insertion order. Every item
/// holds `amount >= 1`. The cart serializes as a bare JSON array of items,
/// which is the persisted format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

/// What `Cart::from_items` had to discard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Ids seen more than once; the first occurrence was kept.
    pub duplicates: Vec<ProductId>,
    /// Ids dropped because their amount was below 1.
    pub invalid_amounts: Vec<ProductId>,
}

impl NormalizeReport {
    /// Check if the input was already a valid cart.
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.invalid_amounts.is_empty()
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from untrusted items, e.g. a stored blob.
    ///
    /// Keeps the first line item per id and drops items with `amount < 1`.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> (Self, NormalizeReport) {
        let mut cart = Self::new();
        let mut report = NormalizeReport::default();

        for item in items {
            if item.amount < 1 {
                report.invalid_amounts.push(item.id());
            } else if cart.contains(item.id()) {
                report.duplicates.push(item.id());
            } else {
                cart.items.push(item);
            }
        }

        (cart, report)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart and return its line items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Get the line item for a product.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Check if a product has a line item.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Get total item count (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Get number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new line item with amount 1.
    pub fn add(&mut self, product: Product) -> Result<&LineItem, CartError> {
        if self.contains(product.id) {
            return Err(CartError::AlreadyInCart(product.id));
        }

        self.items.push(LineItem::new(product));
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// Increase a line item's amount by one, bounded by `stock`.
    ///
    /// Returns the new amount.
    pub fn increment(&mut self, id: ProductId, stock: &Stock) -> Result<i64, CartError> {
        let item = self.get_mut(id).ok_or(CartError::NotFound(id))?;
        let next = item.amount.saturating_add(1);
        stock.ensure(next)?;
        item.amount = next;
        Ok(next)
    }

    /// Set a line item's amount to an absolute value, bounded by `stock`.
    ///
    /// The amount is validated first, then stock, then the item lookup.
    pub fn set_amount(
        &mut self,
        id: ProductId,
        amount: i64,
        stock: &Stock,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidAmount {
                product_id: id,
                amount,
            });
        }
        stock.ensure(amount)?;

        let item = self.get_mut(id).ok_or(CartError::NotFound(id))?;
        item.amount = amount;
        Ok(())
    }

    /// Remove a line item.
    pub fn remove(&mut self, id: ProductId) -> Result<LineItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id() == id)
            .ok_or(CartError::NotFound(id))?;
        Ok(self.items.remove(index))
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.id() == id)
    }
}

/// A line item in the cart.
///
/// Serialized flat, e.g. `{"id":1,"title":"...","price":179.9,"image":"...","amount":2}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity held in the cart.
    pub amount: i64,
}

impl LineItem {
    /// Create a line item with amount 1.
    pub fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// Product id.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            99.9,
            format!("https://img.example/{id}.jpg"),
        )
    }

    fn stock(id: u64, amount: i64) -> Stock {
        Stock::new(ProductId::new(id), amount)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let item = cart.add(product(1)).unwrap();
        assert_eq!(item.amount, 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_item_is_rejected() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();
        let err = cart.add(product(1)).unwrap_err();
        assert_eq!(err, CartError::AlreadyInCart(ProductId::new(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_increment_within_stock() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();
        assert_eq!(cart.increment(ProductId::new(1), &stock(1, 5)).unwrap(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_increment_at_stock_limit() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();
        let err = cart.increment(ProductId::new(1), &stock(1, 1)).unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { requested: 2, available: 1, .. }));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn test_increment_missing_item() {
        let mut cart = Cart::new();
        let err = cart.increment(ProductId::new(9), &stock(9, 5)).unwrap_err();
        assert_eq!(err, CartError::NotFound(ProductId::new(9)));
    }

    #[test]
    fn test_set_amount() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();
        cart.set_amount(ProductId::new(1), 7, &stock(1, 10)).unwrap();
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 7);
    }

    #[test]
    fn test_set_amount_rejects_non_positive() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();
        for amount in [0, -3] {
            let err = cart.set_amount(ProductId::new(1), amount, &stock(1, 10)).unwrap_err();
            assert!(matches!(err, CartError::InvalidAmount { .. }));
        }
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn test_set_amount_above_stock() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();
        let err = cart.set_amount(ProductId::new(1), 4, &stock(1, 3)).unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { .. }));
        let err = cart.set_amount(ProductId::new(1), 1, &stock(1, 0)).unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { .. }));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();
        cart.add(product(2)).unwrap();

        let removed = cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(removed.id(), ProductId::new(1));
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.remove(ProductId::new(1)).unwrap_err(),
            CartError::NotFound(ProductId::new(1))
        );
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Cart::new();
        for id in [3, 1, 2] {
            cart.add(product(id)).unwrap();
        }
        let ids: Vec<u64> = cart.items().iter().map(|i| i.id().get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_serialized_format() {
        let mut cart = Cart::new();
        cart.add(product(1)).unwrap();

        let json: serde_json::Value = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": 1,
                "title": "Product 1",
                "price": 99.9,
                "image": "https://img.example/1.jpg",
                "amount": 1
            }])
        );
    }

    #[test]
    fn test_from_items_normalizes() {
        let mut dup = LineItem::new(product(1));
        dup.amount = 4;
        let mut zero = LineItem::new(product(2));
        zero.amount = 0;

        let (cart, report) = Cart::from_items(vec![LineItem::new(product(1)), dup, zero]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 1);
        assert_eq!(report.duplicates, vec![ProductId::new(1)]);
        assert_eq!(report.invalid_amounts, vec![ProductId::new(2)]);
        assert!(!report.is_clean());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u64),
            Increment(u64, i64),
            SetAmount(u64, i64, i64),
            Remove(u64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u64..5).prop_map(Op::Add),
                (0u64..5, -1i64..6).prop_map(|(id, s)| Op::Increment(id, s)),
                (0u64..5, -2i64..8, -1i64..6).prop_map(|(id, a, s)| Op::SetAmount(id, a, s)),
                (0u64..5).prop_map(Op::Remove),
            ]
        }

        proptest! {
            /// Property: no sequence of mutations yields duplicate ids or amounts below 1.
            #[test]
            fn cart_stays_unique_and_positive(ops in prop::collection::vec(op(), 0..64)) {
                let mut cart = Cart::new();
                for op in ops {
                    let before = cart.clone();
                    let result = match op {
                        Op::Add(id) => cart.add(product(id)).map(|_| ()),
                        Op::Increment(id, s) => cart.increment(ProductId::new(id), &stock(id, s)).map(|_| ()),
                        Op::SetAmount(id, a, s) => cart.set_amount(ProductId::new(id), a, &stock(id, s)),
                        Op::Remove(id) => cart.remove(ProductId::new(id)).map(|_| ()),
                    };
                    if result.is_err() {
                        prop_assert_eq!(&cart, &before);
                    }

                    let mut ids: Vec<ProductId> = cart.items().iter().map(LineItem::id).collect();
                    ids.sort();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), cart.len());
                    prop_assert!(cart.items().iter().all(|i| i.amount >= 1));
                }
            }
        }
    }
}
