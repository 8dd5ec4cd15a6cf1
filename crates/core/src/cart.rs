//! Page-session shopping cart.
//!
//! [`Cart`] is the single source of truth for cart contents. Every mutation
//! funnels through its methods, which keep two invariants:
//!
//! - at most one [`CartLineItem`] per [`MenuItemId`]
//! - every line has `quantity >= 1`; a decrement to zero removes the line
//! - every line has `unit_price >= 0`
//!
//! Totals are never stored. [`Cart::totals`] recomputes them from the lines on
//! every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MenuItem, MenuItemId, Price};

/// Errors returned by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The mutation referenced an ID that has no line in the cart.
    #[error("Cart has no line for item {0}")]
    NotFound(MenuItemId),

    /// An item was added with a price below zero.
    #[error("Item {id} has negative price {price}")]
    NegativePrice { id: MenuItemId, price: Decimal },
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineItem {
    pub id: MenuItemId,
    pub title: String,
    pub unit_price: Decimal,
    pub image_ref: String,
    quantity: u32,
}

impl CartLineItem {
    fn new(id: MenuItemId, title: String, unit_price: Decimal, image_ref: String) -> Self {
        Self {
            id,
            title,
            unit_price,
            image_ref,
            quantity: 1,
        }
    }

    /// Number of units on this line. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub total_price: Decimal,
    pub total_item_count: u32,
}

impl CartTotals {
    /// Total price in the default currency.
    #[must_use]
    pub fn price(&self) -> Price {
        Price::from_amount(self.total_price)
    }
}

/// A control on a rendered cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartAction {
    Increase,
    Decrease,
    Remove,
}

/// Ordered collection of cart lines, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of an item. Returns the line's new quantity.
    ///
    /// Increments the existing line for `id`, or appends a new line with
    /// quantity 1. When the line already exists its title, price and image are
    /// left as first added.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] if `unit_price` is below zero. The
    /// cart is left unchanged.
    pub fn add_item(
        &mut self,
        id: MenuItemId,
        title: impl Into<String>,
        unit_price: Decimal,
        image_ref: impl Into<String>,
    ) -> Result<u32, CartError> {
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(CartError::NegativePrice {
                id,
                price: unit_price,
            });
        }
        if let Some(line) = self.line_mut(&id) {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(line.quantity);
        }
        self.lines
            .push(CartLineItem::new(id, title.into(), unit_price, image_ref.into()));
        Ok(1)
    }

    /// Add one unit of a menu item using its catalog name, price and image.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] for an item with a price below
    /// zero.
    pub fn add_menu_item(&mut self, item: &MenuItem) -> Result<u32, CartError> {
        self.add_item(item.id.clone(), &item.name, item.price, &item.image)
    }

    /// Increment the quantity of an existing line. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if the cart has no line for `id`. The
    /// cart is left unchanged.
    pub fn increment(&mut self, id: &MenuItemId) -> Result<u32, CartError> {
        let line = self
            .line_mut(id)
            .ok_or_else(|| CartError::NotFound(id.clone()))?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// Decrement the quantity of an existing line. Returns the new quantity.
    ///
    /// A result of 0 means the line was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if the cart has no line for `id`. The
    /// cart is left unchanged.
    pub fn decrement(&mut self, id: &MenuItemId) -> Result<u32, CartError> {
        let position = self
            .position(id)
            .ok_or_else(|| CartError::NotFound(id.clone()))?;

        let remaining = match self.lines.get_mut(position) {
            Some(line) => {
                line.quantity -= 1;
                line.quantity
            }
            None => return Err(CartError::NotFound(id.clone())),
        };

        if remaining == 0 {
            self.lines.remove(position);
        }
        Ok(remaining)
    }

    /// Remove the line for `id` if present. Returns whether a line was removed.
    pub fn remove(&mut self, id: &MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    /// Apply a line control to the cart.
    ///
    /// `Remove` on an absent line is a no-op and never fails.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if `Increase` or `Decrease` targets an
    /// absent line.
    pub fn apply(&mut self, id: &MenuItemId, action: CartAction) -> Result<(), CartError> {
        match action {
            CartAction::Increase => self.increment(id).map(|_| ()),
            CartAction::Decrease => self.decrement(id).map(|_| ()),
            CartAction::Remove => {
                self.remove(id);
                Ok(())
            }
        }
    }

    /// Compute `(total_price, total_item_count)` from the current lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.lines.iter().fold(
            CartTotals {
                total_price: Decimal::ZERO,
                total_item_count: 0,
            },
            |acc, line| CartTotals {
                total_price: acc.total_price + line.line_total(),
                total_item_count: acc.total_item_count.saturating_add(line.quantity),
            },
        )
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: &MenuItemId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: &MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }

    fn line_mut(&mut self, id: &MenuItemId) -> Option<&mut CartLineItem> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }
}
