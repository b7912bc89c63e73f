//! Enhancement client — asks the enhancement service to process an image URL
//! and re-uploads the result so it gets a durable URL of its own.

use crate::api::PixupApi;
use crate::config::Destination;
use crate::error::AppError;
use crate::services::upload_client;

/// Name prefix for processed results.
pub const ENHANCED_PREFIX: &str = "enhanced";

pub async fn enhance<A: PixupApi>(
    api: &A,
    source_url: &str,
    destination: &Destination,
) -> crate::error::Result<String> {
    let result = async {
        let payload = api.fetch_enhanced(source_url).await?;
        log::debug!(
            "Enhancement returned {} bytes of {}",
            payload.len(),
            payload.content_type
        );
        upload_client::upload(api, payload, ENHANCED_PREFIX, destination, None).await
    }
    .await;

    result.map_err(|e| {
        log::error!("Error enhancing image: {}", e);
        AppError::EnhanceFailed
    })
}
