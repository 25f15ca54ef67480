//! Backend routes and wire constants shared by the client and its tests.

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub fn meals_route() -> &'static str {
    "/meals"
}

pub fn orders_route() -> &'static str {
    "/orders"
}
