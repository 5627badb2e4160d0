//! IBGE Localities
//!
//! Regions (UFs) and their localities from the public IBGE service.

use crate::models::{IbgeCityResponse, IbgeUfResponse};

const IBGE_STATES_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades/estados";

fn cities_url(uf: &str) -> String {
    format!("{}/{}/distritos", IBGE_STATES_URL, uf)
}

/// Region codes in response order
fn uf_codes(records: Vec<IbgeUfResponse>) -> Vec<String> {
    records.into_iter().map(|r| r.sigla).collect()
}

/// Locality names in response order, first occurrence of each name kept
fn city_names(records: Vec<IbgeCityResponse>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(records.len());
    for record in records {
        if !names.contains(&record.nome) {
            names.push(record.nome);
        }
    }
    names
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;
    response.json::<T>().await.map_err(|e| e.to_string())
}

pub async fn list_ufs() -> Result<Vec<String>, String> {
    let records: Vec<IbgeUfResponse> = fetch_json(IBGE_STATES_URL).await?;
    Ok(uf_codes(records))
}

pub async fn list_cities(uf: &str) -> Result<Vec<String>, String> {
    let records: Vec<IbgeCityResponse> = fetch_json(&cities_url(uf)).await?;
    Ok(city_names(records))
}
