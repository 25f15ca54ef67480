use serde::{Deserialize, Serialize};

use crate::{
    domain::{CartItem, Customer, Meal, MealId, OrderRequest},
    error::{CustomerField, ValidationError},
};

/// Items picked from the menu, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one unit of `meal`, bumping the quantity if it is already in the cart.
    pub fn add_item(&mut self, meal: &Meal) {
        match self.items.iter_mut().find(|item| item.id == meal.id) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem::from(meal)),
        }
    }

    /// Removes one unit of the item; the line disappears when its quantity hits zero.
    /// Returns false when the item was not in the cart.
    pub fn remove_item(&mut self, id: &MealId) -> bool {
        let Some(idx) = self.items.iter().position(|item| &item.id == id) else {
            return false;
        };

        if self.items[idx].quantity > 1 {
            self.items[idx].quantity -= 1;
        } else {
            self.items.remove(idx);
        }
        true
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_order_request(&self, customer: Customer) -> OrderRequest {
        OrderRequest::new(self.items.clone(), customer)
    }
}

impl Customer {
    /// Checks the same constraints the checkout form enforces before submitting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            (CustomerField::Name, &self.name),
            (CustomerField::Email, &self.email),
            (CustomerField::Street, &self.street),
            (CustomerField::PostalCode, &self.postal_code),
            (CustomerField::City, &self.city),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ValidationError::InvalidEmail(email.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
