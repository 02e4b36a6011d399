use salvo::Depot;
use tracing::error;

use crate::config::get_config_from_depot;

/// ## Summary
/// Middleware that gates every route behind the shared secret.
/// The secret arrives as the `key` query parameter; feed readers
/// cannot send headers, so this is the whole authentication scheme.
/// Use this as a handler in routes to protect them.
pub struct AuthMiddleware;

/// ## Summary
/// Checks the `key` query parameter against the configured shared
/// secret. A missing or mismatched key ends the request with an empty
/// 401 Unauthorized response.
///
/// ## Errors
/// Returns an HTTP 401 Unauthorized response if the key is absent or
/// wrong, and 500 if the configuration is not available.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        let key = req.query::<String>("key");

        if key.as_deref() != Some(config.auth.shared_secret.as_str()) {
            tracing::debug!("Rejecting request with missing or wrong key");
            res.status_code(salvo::http::StatusCode::UNAUTHORIZED);
            ctrl.skip_rest();
            return;
        }

        tracing::trace!("Request authenticated");
    }
}
