use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::Coordinates,
    error::{geocode_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    status: String,
    results: Option<Vec<GeocodeResult>>,
}

#[tracing::instrument]
pub async fn geocode_address(address: &str) -> Result<Coordinates, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/geocode/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("address", address.to_owned())])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(geocode_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response = res.json().await?;

    if data.status == "ZERO_RESULTS" {
        return Err(geocode_error());
    }

    if data.status != "OK" {
        return Err(upstream_error());
    }

    let result = data
        .results
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0))
            }
        })
        .ok_or_else(|| geocode_error())?;

    Ok(result.geometry.location)
}
