//! Quantity picker state for the product page.

use crate::catalog::ProductRecord;

/// Largest quantity the picker will offer.
pub const MAX_SELECTABLE_QUANTITY: u32 = 9999;

/// Bounded quantity counter. The value never drops below the minimum
/// (at least 1) and never exceeds the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    value: u32,
    min: u32,
    max: u32,
}

impl Default for QuantitySelector {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantitySelector {
    /// Picker starting at 1.
    pub fn new() -> Self {
        Self::with_bounds(1, MAX_SELECTABLE_QUANTITY)
    }

    /// Picker for `product`, honouring its minimum order quantity.
    pub fn for_product(product: &ProductRecord) -> Self {
        Self::with_bounds(
            product.min_order_quantity.unwrap_or(1),
            MAX_SELECTABLE_QUANTITY,
        )
    }

    /// Picker over `min..=max`, starting at `min`. A zero `min` is raised to 1
    /// and `max` is raised to `min` if lower.
    pub fn with_bounds(min: u32, max: u32) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self {
            value: min,
            min,
            max,
        }
    }

    /// Current quantity.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Step up by one, stopping at the maximum.
    pub fn increment(&mut self) -> u32 {
        self.value = (self.value + 1).min(self.max);
        self.value
    }

    /// Step down by one, stopping at the minimum.
    pub fn decrement(&mut self) -> u32 {
        self.value = self.value.saturating_sub(1).max(self.min);
        self.value
    }

    /// Set directly, clamped into range.
    pub fn set(&mut self, value: u32) -> u32 {
        self.value = value.clamp(self.min, self.max);
        self.value
    }
}
