use std::fmt::Write as _;

use client_core::RequestState;
use shared::{
    cart::Cart,
    domain::{Meal, OrderConfirmation},
    formatting::format_usd,
};

pub fn meals_view(state: &RequestState<Vec<Meal>>) -> String {
    if state.is_loading {
        return "Fetching meals...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("Failed to fetch meals: {error}");
    }
    if state.data.is_empty() {
        return "No meals found.".to_string();
    }

    let mut out = String::new();
    for meal in &state.data {
        let _ = writeln!(
            out,
            "{:<6} {:<28} {:>10}",
            meal.id.as_str(),
            meal.name,
            format_usd(meal.price)
        );
        if !meal.description.is_empty() {
            let _ = writeln!(out, "       {}", meal.description);
        }
    }
    out.trim_end().to_string()
}

pub fn cart_view(cart: &Cart) -> String {
    let mut out = String::new();
    for item in cart.items() {
        let _ = writeln!(
            out,
            "{} - {} x {}",
            item.name,
            item.quantity,
            format_usd(item.price)
        );
    }
    let _ = write!(out, "Total Amount: {}", format_usd(cart.total()));
    out
}

pub fn order_view(state: &RequestState<Option<OrderConfirmation>>) -> String {
    if state.is_loading {
        return "Sending order data...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("Failed to submit order: {error}");
    }
    match &state.data {
        Some(confirmation) => {
            let mut out = "Success! Your order was submitted successfully.".to_string();
            if let Some(message) = &confirmation.message {
                let _ = write!(out, " ({message})");
            }
            out
        }
        None => "Order not submitted yet.".to_string(),
    }
}
