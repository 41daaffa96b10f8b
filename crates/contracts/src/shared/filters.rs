use serde::{Deserialize, Serialize};

/// Organizational unit (UG) available in the filter select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnidadeGestora {
    #[serde(alias = "codigo")]
    pub coug: String,
    #[serde(alias = "noug", alias = "descricao")]
    pub nome: String,
}

/// Response of the `/api/filtros` endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltrosResponse {
    /// Years with data, as sent by the server (usually descending)
    #[serde(default)]
    pub anos: Vec<i32>,
    /// Current fiscal year, when the server knows it
    #[serde(default)]
    pub ano_atual: Option<i32>,
    /// Latest closed month of the current year (1..=12)
    #[serde(default)]
    pub ultimo_mes: Option<u32>,
    #[serde(default)]
    pub ugs: Vec<UnidadeGestora>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_filtros() {
        let json = r#"{
            "anos": [2024, 2023],
            "ano_atual": 2024,
            "ultimo_mes": 6,
            "ugs": [{"coug": "150101", "nome": "Secretaria da Fazenda"}]
        }"#;
        let filtros: FiltrosResponse = serde_json::from_str(json).unwrap();
        assert_eq!(filtros.anos, vec![2024, 2023]);
        assert_eq!(filtros.ultimo_mes, Some(6));
        assert_eq!(filtros.ugs[0].nome, "Secretaria da Fazenda");
    }

    #[test]
    fn test_deserialize_ug_aliases() {
        let ug: UnidadeGestora =
            serde_json::from_str(r#"{"codigo": "010101", "noug": "Assembleia"}"#).unwrap();
        assert_eq!(ug.coug, "010101");
        assert_eq!(ug.nome, "Assembleia");
    }

    #[test]
    fn test_missing_defaults() {
        let filtros: FiltrosResponse = serde_json::from_str(r#"{"anos": [2022]}"#).unwrap();
        assert_eq!(filtros.ano_atual, None);
        assert!(filtros.ugs.is_empty());
    }
}
