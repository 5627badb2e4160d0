//! Frontend Models
//!
//! Data structures returned by the backend and the IBGE locality service.

use serde::{Deserialize, Serialize};

/// Collectible item category (matches backend `GET /items`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub title: String,
    pub image_url: String,
}

/// Federative unit as returned by IBGE; only the two-letter code is used
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IbgeUfResponse {
    pub sigla: String,
}

/// Locality as returned by IBGE; only the display name is used
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IbgeCityResponse {
    pub nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_from_backend_shape() {
        let json = r#"{"id":3,"title":"Papéis e Papelão","image_url":"http://localhost:3333/uploads/papeis-papelao.svg"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 3);
        assert_eq!(item.title, "Papéis e Papelão");
    }

    #[test]
    fn test_ibge_records_ignore_extra_fields() {
        let uf: IbgeUfResponse =
            serde_json::from_str(r#"{"id":35,"sigla":"SP","nome":"São Paulo","regiao":{"id":3}}"#).unwrap();
        assert_eq!(uf.sigla, "SP");

        let city: IbgeCityResponse =
            serde_json::from_str(r#"{"id":350950205,"nome":"Campinas","municipio":{"id":3509502}}"#).unwrap();
        assert_eq!(city.nome, "Campinas");
    }
}
