//! The contract record the form edits.

use serde::{Deserialize, Serialize};

use super::amount_in_words;

/// Party hiring the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientInfo {
    pub name: String,
    /// Tax or identity document number (CPF/CNPJ).
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Everything the document preview interpolates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractData {
    pub client: ClientInfo,
    pub price_cents: u64,
    pub payment_method: String,
    pub deadline: String,
    pub start_date: String,
    pub service_description: String,
    pub additional_clauses: Vec<String>,
    /// Logo as a data URL.
    pub logo: Option<String>,
}

impl ContractData {
    const EXPORT_FALLBACK_NAME: &'static str = "contrato";

    /// File name for an exported document, derived from the client name.
    ///
    /// Whitespace runs become a single underscore: `Maria da Silva`
    /// exports as `Maria_da_Silva_contrato.pdf`.
    pub fn export_file_name(&self) -> String {
        let name = self.client.name.trim();
        let base = if name.is_empty() {
            Self::EXPORT_FALLBACK_NAME.to_string()
        } else {
            name.split_whitespace().collect::<Vec<_>>().join("_")
        };
        format!("{}_contrato.pdf", base)
    }

    /// The price spelled out in Portuguese; centavos are dropped.
    pub fn price_in_words(&self) -> String {
        amount_in_words(self.price_cents / 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_client(name: &str) -> ContractData {
        ContractData {
            client: ClientInfo {
                name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn export_name_replaces_whitespace_runs() {
        assert_eq!(
            with_client("Maria  da\tSilva").export_file_name(),
            "Maria_da_Silva_contrato.pdf"
        );
    }

    #[test]
    fn export_name_falls_back_without_client() {
        assert_eq!(with_client("   ").export_file_name(), "contrato_contrato.pdf");
    }

    #[test]
    fn price_in_words_uses_whole_reais() {
        let mut data = with_client("ACME");
        assert_eq!(data.price_in_words(), "zero reais");

        data.price_cents = 10_000;
        assert_eq!(data.price_in_words(), "cem reais");

        data.price_cents = 150_099;
        assert_eq!(data.price_in_words(), "mil quinhentos reais");
    }

    #[test]
    fn deserializes_partial_records_with_defaults() {
        let data: ContractData =
            serde_json::from_str(r#"{"client": {"name": "ACME"}, "priceCents": 150000}"#).unwrap();
        assert_eq!(data.client.name, "ACME");
        assert_eq!(data.price_cents, 150_000);
        assert!(data.additional_clauses.is_empty());
        assert_eq!(data.logo, None);
    }
}
