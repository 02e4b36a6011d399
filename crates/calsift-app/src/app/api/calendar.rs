//! The filtered-calendar endpoint.

use salvo::{Depot, Response, Router, handler};

use calsift_engine::{MatchPolicy, filter_by_keyword, filter_duplicates};
use calsift_rfc::error::RfcError;
use calsift_rfc::ical::build::serialize;
use calsift_rfc::ical::parse::parse;

use crate::config::{Settings, get_config_from_depot};
use crate::error::{AppError, AppResult};
use crate::feed::FeedSource;

/// ## Summary
/// Serves the target feed with keyword-matched events and duplicates of
/// the primary feed removed, as `text/calendar`.
///
/// ## Errors
/// Responds 502 with an empty body when either upstream feed cannot be
/// loaded, and 500 with an empty body when a feed cannot be parsed.
#[handler]
async fn calendar(depot: &Depot, res: &mut Response) {
    let config = match get_config_from_depot(depot) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to get config from depot");
            res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
            return;
        }
    };

    match filtered_feed(&config).await {
        Ok(body) => {
            if let Err(error) = res.add_header("content-type", "text/calendar; charset=utf-8", true)
            {
                tracing::error!(%error, "Failed to set content type header");
            }
            res.body(body);
        }
        Err(error @ (AppError::FetchError(_) | AppError::IoError(_))) => {
            tracing::warn!(%error, "Upstream feed unavailable");
            res.status_code(salvo::http::StatusCode::BAD_GATEWAY);
        }
        Err(error) => {
            tracing::error!(%error, "Failed to build filtered feed");
            res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

/// Loads both feeds, filters the target, and serializes the result.
async fn filtered_feed(config: &Settings) -> AppResult<String> {
    let primary_source = FeedSource::parse(&config.feeds.primary);
    let target_source = FeedSource::parse(&config.feeds.target);
    let (primary_text, target_text) =
        tokio::try_join!(primary_source.load(), target_source.load())?;

    let primary = parse(&primary_text).map_err(RfcError::from)?;
    let mut target = parse(&target_text).map_err(RfcError::from)?;

    let policy = MatchPolicy {
        fuzzy_threshold: config.filter.fuzzy_threshold,
    };

    let removed_by_keyword = filter_by_keyword(&mut target, &config.filter.phrases);
    let removed_as_duplicates = filter_duplicates(&mut target, &primary, &policy);

    tracing::info!(
        removed_by_keyword,
        removed_as_duplicates,
        remaining = target.events().len(),
        "Filtered target feed"
    );

    Ok(serialize(&target))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("calendar").get(calendar)
}
