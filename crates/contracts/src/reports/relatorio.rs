//! Report tree shared by "Balanço Receita" and "Relatório Receita/Fonte".
//!
//! The server sends the tree flattened in display order; the hierarchy is
//! implied by `nivel` (0 = totals, 4 = organizational unit leaf).

use serde::{Deserialize, Serialize};

pub const NIVEL_TOTAL: u8 = 0;
pub const NIVEL_UG: u8 = 4;
pub const NIVEL_MAXIMO: u8 = NIVEL_UG;

/// Report grouping requested from the Receita/Fonte endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoRelatorio {
    /// Grouped by revenue source, then category
    #[default]
    Fonte,
    /// Grouped by revenue category, then source
    Alinea,
}

impl TipoRelatorio {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoRelatorio::Fonte => "fonte",
            TipoRelatorio::Alinea => "alinea",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipoRelatorio::Fonte => "Por Fonte",
            TipoRelatorio::Alinea => "Por Alínea",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fonte" => Some(TipoRelatorio::Fonte),
            "alinea" => Some(TipoRelatorio::Alinea),
            _ => None,
        }
    }

    pub fn all() -> [TipoRelatorio; 2] {
        [TipoRelatorio::Fonte, TipoRelatorio::Alinea]
    }
}

/// Single row of the report tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinhaRelatorio {
    pub nivel: u8,
    #[serde(default)]
    pub codigo: String,
    pub descricao: String,
    /// Revenue source code, present on rows that can be drilled down
    #[serde(default)]
    pub cofonte: Option<String>,
    /// Revenue category code, present on rows that can be drilled down
    #[serde(default)]
    pub coalinea: Option<String>,
    #[serde(default)]
    pub coug: Option<String>,
    #[serde(default)]
    pub previsao_inicial: Option<f64>,
    #[serde(default)]
    pub previsao_atualizada: Option<f64>,
    /// Value for the selected period
    #[serde(default)]
    pub receita_atual: Option<f64>,
    /// Value for the same period of the previous year
    #[serde(default)]
    pub receita_anterior: Option<f64>,
    #[serde(default)]
    pub variacao_absoluta: Option<f64>,
    #[serde(default)]
    pub variacao_percentual: Option<f64>,
}

impl LinhaRelatorio {
    pub fn is_total(&self) -> bool {
        self.nivel == NIVEL_TOTAL
    }

    /// (fonte, alínea) pair used by the line-item drill-down
    pub fn drilldown_key(&self) -> Option<(String, String)> {
        match (self.cofonte.as_deref(), self.coalinea.as_deref()) {
            (Some(fonte), Some(alinea)) if !fonte.is_empty() && !alinea.is_empty() => {
                Some((fonte.to_string(), alinea.to_string()))
            }
            _ => None,
        }
    }
}

/// Period the report refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Periodo {
    pub ano: i32,
    pub mes: u32,
    /// Comparison year; the server omits it when it is `ano - 1`
    #[serde(default)]
    pub ano_anterior: Option<i32>,
    /// Human readable period, e.g. "Janeiro a Junho de 2024"
    #[serde(default)]
    pub descricao: Option<String>,
}

impl Periodo {
    pub fn ano_inicial(&self) -> i32 {
        self.ano_anterior.unwrap_or(self.ano - 1)
    }
}

/// Response of the `/api/gerar` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatorioResponse {
    #[serde(default)]
    pub dados: Vec<LinhaRelatorio>,
    #[serde(default)]
    pub tem_dados: bool,
    #[serde(default)]
    pub periodo: Option<Periodo>,
    #[serde(default)]
    pub tipo: Option<String>,
}

/// Response of the `/api/exportar` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportacaoResponse {
    #[serde(default)]
    pub dados: Vec<LinhaRelatorio>,
    #[serde(default)]
    pub periodo: Option<Periodo>,
    #[serde(default)]
    pub tipo: Option<String>,
}

/// Query parameters of the generate endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GerarRelatorioParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<TipoRelatorio>,
    pub ano: i32,
    pub mes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coug: Option<String>,
}

/// Query parameters of the export endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportarRelatorioParams {
    #[serde(flatten)]
    pub filtros: GerarRelatorioParams,
    pub formato: String,
}

impl ExportarRelatorioParams {
    pub fn excel(filtros: GerarRelatorioParams) -> Self {
        Self {
            filtros,
            formato: "excel".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_row_with_nulls() {
        let json = r#"{
            "nivel": 1,
            "codigo": "1.1",
            "descricao": "Impostos",
            "previsao_inicial": 1000.5,
            "receita_atual": null
        }"#;
        let row: LinhaRelatorio = serde_json::from_str(json).unwrap();
        assert_eq!(row.nivel, 1);
        assert_eq!(row.previsao_inicial, Some(1000.5));
        assert_eq!(row.receita_atual, None);
        assert!(row.drilldown_key().is_none());
    }

    #[test]
    fn test_total_level() {
        let mut row: LinhaRelatorio =
            serde_json::from_str(r#"{"nivel": 0, "descricao": "TOTAL"}"#).unwrap();
        assert!(row.is_total());
        row.nivel = NIVEL_UG;
        assert!(!row.is_total());
    }

    #[test]
    fn test_drilldown_key_requires_both_codes() {
        let row: LinhaRelatorio = serde_json::from_str(
            r#"{"nivel": 2, "descricao": "IPVA", "cofonte": "500", "coalinea": "11125001"}"#,
        )
        .unwrap();
        assert_eq!(
            row.drilldown_key(),
            Some(("500".to_string(), "11125001".to_string()))
        );

        let row: LinhaRelatorio = serde_json::from_str(
            r#"{"nivel": 2, "descricao": "IPVA", "cofonte": "500", "coalinea": ""}"#,
        )
        .unwrap();
        assert!(row.drilldown_key().is_none());
    }

    #[test]
    fn test_tipo_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TipoRelatorio::Alinea).unwrap(),
            "\"alinea\""
        );
        assert_eq!(TipoRelatorio::parse("fonte"), Some(TipoRelatorio::Fonte));
        assert_eq!(TipoRelatorio::parse("x"), None);
    }

    #[test]
    fn test_periodo_ano_inicial_defaults_to_previous_year() {
        let periodo = Periodo {
            ano: 2024,
            mes: 6,
            ano_anterior: None,
            descricao: None,
        };
        assert_eq!(periodo.ano_inicial(), 2023);
    }

    #[test]
    fn test_export_params_flatten() {
        let params = ExportarRelatorioParams::excel(GerarRelatorioParams {
            tipo: None,
            ano: 2024,
            mes: 6,
            coug: None,
        });
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["ano"], 2024);
        assert_eq!(value["formato"], "excel");
        assert!(value.get("tipo").is_none());
    }
}
