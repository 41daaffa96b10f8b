use serde::{Deserialize, Serialize};

/// Debit/credit side of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebitoCredito {
    #[serde(rename = "D", alias = "d")]
    Debito,
    #[serde(rename = "C", alias = "c")]
    Credito,
}

impl DebitoCredito {
    pub fn label(&self) -> &'static str {
        match self {
            DebitoCredito::Debito => "D",
            DebitoCredito::Credito => "C",
        }
    }
}

/// Single accounting ledger entry (lançamento) behind a report figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lancamento {
    pub cocontacontabil: String,
    #[serde(default)]
    pub nocontacontabil: String,
    pub coug: String,
    #[serde(default)]
    pub noug: String,
    #[serde(default)]
    pub nudocumento: String,
    #[serde(default)]
    pub coevento: String,
    #[serde(default)]
    pub noevento: String,
    #[serde(default)]
    pub cogrupo: String,
    pub indebitocredito: DebitoCredito,
    #[serde(default)]
    pub valor: f64,
}

/// Response of `/relatorio-receita-fonte/api/detalhes-lancamentos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LancamentosResponse {
    #[serde(default)]
    pub dados: Vec<Lancamento>,
    #[serde(default)]
    pub total_debito: f64,
    #[serde(default)]
    pub total_credito: f64,
    #[serde(default)]
    pub saldo: f64,
    /// Total matching records on the server, may exceed `dados.len()`
    #[serde(default)]
    pub total_registros: u64,
    /// Set when the server capped the result
    #[serde(default)]
    pub limitado: bool,
}

/// Query parameters of the line-item drill-down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetalhesLancamentosParams {
    pub cofonte: String,
    pub coalinea: String,
    pub ano: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_lancamentos() {
        let json = r#"{
            "dados": [{
                "cocontacontabil": "621200000",
                "nocontacontabil": "Receita Realizada",
                "coug": "150101",
                "noug": "SEFAZ",
                "nudocumento": "2024NL000123",
                "coevento": "500101",
                "noevento": "Arrecadação",
                "cogrupo": "1",
                "indebitocredito": "C",
                "valor": 1520.75
            }],
            "total_debito": 0,
            "total_credito": 1520.75,
            "saldo": 1520.75,
            "total_registros": 1,
            "limitado": false
        }"#;
        let resp: LancamentosResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.dados.len(), 1);
        assert_eq!(resp.dados[0].indebitocredito, DebitoCredito::Credito);
        assert!(!resp.limitado);
    }

    #[test]
    fn test_debito_credito_lowercase_alias() {
        let flag: DebitoCredito = serde_json::from_str("\"d\"").unwrap();
        assert_eq!(flag, DebitoCredito::Debito);
        assert_eq!(serde_json::to_string(&flag).unwrap(), "\"D\"");
    }
}
