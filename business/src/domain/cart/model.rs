use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::CartError;
use super::value_objects::Quantity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: Uuid,
    pub quantity: Quantity,
}

/// A cart holds at most one line item per product reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: Uuid,
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        items: Vec<LineItem>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            items,
            created_at,
            updated_at,
        }
    }

    /// Increments the quantity of an existing line or appends a new one.
    pub fn add_product(&mut self, product_id: Uuid) {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.increment(),
            None => self.items.push(LineItem {
                product_id,
                quantity: Quantity::ONE,
            }),
        }
        self.touch();
    }

    pub fn update_quantity(&mut self, product_id: Uuid, quantity: Quantity) -> Result<(), CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or_else(|| CartError::LineItemNotFound(product_id.to_string()))?;
        item.quantity = quantity;
        self.touch();
        Ok(())
    }

    pub fn remove_product(&mut self, product_id: Uuid) -> Result<(), CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.product_id == product_id)
            .ok_or_else(|| CartError::LineItemNotFound(product_id.to_string()))?;
        self.items.remove(index);
        self.touch();
        Ok(())
    }

    /// Replaces every line. Repeated references collapse into the first
    /// occurrence with their quantities summed.
    pub fn replace_items(&mut self, items: Vec<LineItem>) {
        let mut merged: Vec<LineItem> = Vec::with_capacity(items.len());
        for item in items {
            match merged.iter_mut().find(|m| m.product_id == item.product_id) {
                Some(existing) => existing.quantity = existing.quantity.merge(item.quantity),
                None => merged.push(item),
            }
        }
        self.items = merged;
        self.touch();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|i| i.product_id).collect()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
