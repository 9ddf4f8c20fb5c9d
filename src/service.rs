//! Weather Service
//!
//! Turns a decoded request into a response. This is the validation and
//! resolution step of every exchange, kept apart from the socket handling so
//! it can be exercised directly.
//!
//! ## Validation order
//! 1. The type must be one of `t`, `h`, `w`, `p` (any case) → else INVALID_REQUEST
//! 2. The city must be in the registry → else CITY_NOT_AVAILABLE
//!
//! An invalid type wins even when the city is unknown too.

use std::sync::Arc;

use crate::protocol::{WeatherRequest, WeatherResponse};
use crate::provider::WeatherProvider;
use crate::registry::CityRegistry;

/// Validates requests and resolves readings
#[derive(Clone)]
pub struct WeatherService {
    /// Read-only set of supported cities
    registry: Arc<CityRegistry>,

    /// Source of readings
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(registry: Arc<CityRegistry>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { registry, provider }
    }

    /// Produce the single response owed for `request`
    pub fn respond(&self, request: &WeatherRequest) -> WeatherResponse {
        let Some(kind) = request.kind() else {
            return WeatherResponse::invalid_request();
        };

        if !self.registry.lookup(request.city()) {
            return WeatherResponse::city_not_available();
        }

        WeatherResponse::success(kind, self.provider.value_for(kind))
    }

    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }
}
