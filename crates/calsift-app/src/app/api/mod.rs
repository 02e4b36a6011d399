mod calendar;
mod healthcheck;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

/// ## Summary
/// Constructs the main router: a public healthcheck and the filtered
/// calendar endpoint behind shared-secret authentication.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(Router::new().hoop(AuthMiddleware).push(calendar::routes()))
}
