use std::sync::Arc;

use shared::{
    cart::Cart,
    domain::{Customer, Meal, OrderConfirmation},
    protocol::{meals_route, orders_route, JSON_CONTENT_TYPE},
};
use tracing::info;
use url::Url;

pub mod error;
pub mod request_state;
pub mod transport;
pub mod types;

pub use error::{CheckoutError, RequestError};
pub use request_state::RequestStateController;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use types::{RequestConfig, RequestEvent, RequestState, READ_METHOD};

pub type MealsController = RequestStateController<Vec<Meal>>;
pub type OrderController = RequestStateController<Option<OrderConfirmation>>;

/// Entry point to the ordering backend. Hands out one controller per call site.
pub struct StorefrontClient {
    base_url: Url,
    meals_url: Url,
    orders_url: Url,
    transport: Arc<dyn HttpTransport>,
}

impl StorefrontClient {
    pub fn new(server_url: &str) -> Result<Self, url::ParseError> {
        Self::with_transport(server_url, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        server_url: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(server_url.trim())?;
        // Keep any path prefix: routes are joined relative to it.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let meals_url = base_url.join(meals_route().trim_start_matches('/'))?;
        let orders_url = base_url.join(orders_route().trim_start_matches('/'))?;

        Ok(Self {
            base_url,
            meals_url,
            orders_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn meals_url(&self) -> &Url {
        &self.meals_url
    }

    pub fn orders_url(&self) -> &Url {
        &self.orders_url
    }

    pub fn meals(&self) -> Arc<MealsController> {
        RequestStateController::new(
            self.meals_url.as_str(),
            Some(RequestConfig::new()),
            Vec::new(),
            Arc::clone(&self.transport),
        )
    }

    pub fn order_submission(&self) -> Arc<OrderController> {
        RequestStateController::new(
            self.orders_url.as_str(),
            Some(order_request_config()),
            None,
            Arc::clone(&self.transport),
        )
    }
}

pub fn order_request_config() -> RequestConfig {
    RequestConfig::new()
        .with_method("POST")
        .with_header("Content-Type", JSON_CONTENT_TYPE)
}

/// Local validation errors are returned; the request outcome only lands in `submission` state.
pub async fn submit_order(
    submission: &OrderController,
    cart: &Cart,
    customer: Customer,
) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    customer.validate()?;

    let body = serde_json::to_value(cart.to_order_request(customer))?;
    info!(
        url = submission.target(),
        items = cart.items().len(),
        quantity = cart.total_quantity(),
        "checkout: submitting order"
    );
    submission.invoke_with_body(body).await;
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
