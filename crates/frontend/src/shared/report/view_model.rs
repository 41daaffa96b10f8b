//! Report rows prepared for display and export.
//!
//! The table component only ever sees [`RowView`]s; all formatting happens here.

use crate::shared::export::{CsvExportable, SheetCell};
use crate::shared::format::{format_currency, format_hierarchy_label, format_percent};
use crate::shared::list_utils::{is_active_filter, Searchable};
use contracts::reports::relatorio::{LinhaRelatorio, NIVEL_MAXIMO};

/// Header labels of the six numeric columns, in display order
pub const VALUE_HEADERS: [&str; 6] = [
    "Previsão Inicial",
    "Previsão Atualizada",
    "Receita no Período",
    "Receita Período Anterior",
    "Variação (R$)",
    "Variação (%)",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Position in the visible row list, used as the list key
    pub index: usize,
    pub nivel: u8,
    pub label: String,
    pub row_class: &'static str,
    pub values: [String; 6],
    pub variance_class: &'static str,
    pub drilldown: Option<(String, String)>,
}

/// What the table body shows
#[derive(Debug, Clone, PartialEq)]
pub enum TableState {
    /// No report requested yet
    Initial,
    Loading,
    Empty(&'static str),
    Rows(Vec<RowView>),
}

/// Client-side re-filtering applied on top of the pristine report rows
#[derive(Debug, Clone, PartialEq)]
pub struct RowFilter {
    pub texto: String,
    /// Deepest level shown (0..=4)
    pub nivel_maximo: u8,
}

impl Default for RowFilter {
    fn default() -> Self {
        Self {
            texto: String::new(),
            nivel_maximo: NIVEL_MAXIMO,
        }
    }
}

impl RowFilter {
    pub fn is_identity(&self) -> bool {
        !is_active_filter(&self.texto) && self.nivel_maximo >= NIVEL_MAXIMO
    }
}

impl Searchable for LinhaRelatorio {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        self.descricao.to_lowercase().contains(filter_lower)
            || self.codigo.to_lowercase().contains(filter_lower)
            || self
                .coug
                .as_deref()
                .is_some_and(|coug| coug.contains(filter_lower))
    }
}

/// Applies `filter` to the rows in server order.
///
/// A text match keeps the matching row, its ancestors (so the tree stays
/// readable) and its descendants. Rows deeper than `nivel_maximo` are dropped.
pub fn filter_rows(rows: &[LinhaRelatorio], filter: &RowFilter) -> Vec<LinhaRelatorio> {
    let within_depth = |row: &LinhaRelatorio| row.nivel <= filter.nivel_maximo;

    if !is_active_filter(&filter.texto) {
        return rows.iter().filter(|r| within_depth(r)).cloned().collect();
    }

    let needle = filter.texto.trim().to_lowercase();
    let mut keep = vec![false; rows.len()];
    // (index, nivel, matched itself or through an ancestor)
    let mut ancestors: Vec<(usize, u8, bool)> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        while ancestors
            .last()
            .is_some_and(|&(_, nivel, _)| nivel >= row.nivel)
        {
            ancestors.pop();
        }

        let inherited = ancestors.iter().any(|&(_, _, matched)| matched);
        let matched = row.matches_filter(&needle);

        if matched {
            for &(idx, _, _) in &ancestors {
                keep[idx] = true;
            }
        }
        keep[i] = matched || inherited;
        ancestors.push((i, row.nivel, matched || inherited));
    }

    rows.iter()
        .zip(keep)
        .filter(|(row, kept)| *kept && within_depth(row))
        .map(|(row, _)| row.clone())
        .collect()
}

fn variance_class(value: Option<f64>) -> &'static str {
    match value {
        Some(v) if v > 0.0 => "positivo",
        Some(v) if v < 0.0 => "negativo",
        _ => "",
    }
}

/// Builds display rows; `level_classes[n]` is the CSS class of level `n`
pub fn build_rows(rows: &[LinhaRelatorio], level_classes: &[&'static str]) -> Vec<RowView> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| RowView {
            index,
            nivel: row.nivel,
            label: format_hierarchy_label(row.nivel, &row.codigo, &row.descricao),
            row_class: level_classes
                .get(row.nivel as usize)
                .or(level_classes.last())
                .copied()
                .unwrap_or(""),
            values: [
                format_currency(row.previsao_inicial),
                format_currency(row.previsao_atualizada),
                format_currency(row.receita_atual),
                format_currency(row.receita_anterior),
                format_currency(row.variacao_absoluta),
                format_percent(row.variacao_percentual),
            ],
            variance_class: variance_class(row.variacao_absoluta),
            drilldown: row.drilldown_key(),
        })
        .collect()
}

/// Table body state for the current controller data
pub fn table_state(
    loading: bool,
    has_report: bool,
    rows: Vec<RowView>,
    empty_message: &'static str,
) -> TableState {
    if loading && !has_report {
        TableState::Loading
    } else if !has_report {
        TableState::Initial
    } else if rows.is_empty() {
        TableState::Empty(empty_message)
    } else {
        TableState::Rows(rows)
    }
}

impl CsvExportable for LinhaRelatorio {
    fn headers() -> Vec<&'static str> {
        let mut headers = vec!["Nível", "Código", "Descrição"];
        headers.extend(VALUE_HEADERS);
        headers
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.nivel.to_string(),
            self.codigo.clone(),
            self.descricao.clone(),
            format_currency(self.previsao_inicial),
            format_currency(self.previsao_atualizada),
            format_currency(self.receita_atual),
            format_currency(self.receita_anterior),
            format_currency(self.variacao_absoluta),
            format_percent(self.variacao_percentual),
        ]
    }
}

/// Spreadsheet row; the description keeps its indentation so the tree is visible
pub fn to_sheet_row(row: &LinhaRelatorio) -> Vec<SheetCell> {
    vec![
        SheetCell::from(row.codigo.clone()),
        SheetCell::from(format_hierarchy_label(row.nivel, "", &row.descricao)),
        row.previsao_inicial.into(),
        row.previsao_atualizada.into(),
        row.receita_atual.into(),
        row.receita_anterior.into(),
        row.variacao_absoluta.into(),
        row.variacao_percentual.into(),
    ]
}

pub fn sheet_headers() -> Vec<&'static str> {
    let mut headers = vec!["Código", "Descrição"];
    headers.extend(VALUE_HEADERS);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: [&str; 5] = ["nivel-0", "nivel-1", "nivel-2", "nivel-3", "nivel-4"];

    fn row(nivel: u8, codigo: &str, descricao: &str) -> LinhaRelatorio {
        LinhaRelatorio {
            nivel,
            codigo: codigo.to_string(),
            descricao: descricao.to_string(),
            cofonte: None,
            coalinea: None,
            coug: None,
            previsao_inicial: Some(1000.0),
            previsao_atualizada: None,
            receita_atual: Some(1200.0),
            receita_anterior: Some(1000.0),
            variacao_absoluta: Some(200.0),
            variacao_percentual: Some(20.0),
        }
    }

    fn tree() -> Vec<LinhaRelatorio> {
        vec![
            row(0, "", "TOTAL"),
            row(1, "1", "Receitas Correntes"),
            row(2, "1.1", "Impostos"),
            row(3, "1.1.1", "IPVA"),
            row(4, "150101", "SEFAZ"),
            row(3, "1.1.2", "ICMS"),
            row(2, "1.2", "Taxas"),
            row(1, "2", "Receitas de Capital"),
        ]
    }

    fn descriptions(rows: &[LinhaRelatorio]) -> Vec<&str> {
        rows.iter().map(|r| r.descricao.as_str()).collect()
    }

    #[test]
    fn test_filter_keeps_ancestors_and_descendants() {
        let filter = RowFilter {
            texto: "ipva".to_string(),
            ..Default::default()
        };
        let rows = tree();
        let filtered = filter_rows(&rows, &filter);
        assert_eq!(
            descriptions(&filtered),
            vec!["TOTAL", "Receitas Correntes", "Impostos", "IPVA", "SEFAZ"]
        );
    }

    #[test]
    fn test_filter_by_level() {
        let filter = RowFilter {
            texto: String::new(),
            nivel_maximo: 1,
        };
        let rows = tree();
        assert_eq!(
            descriptions(&filter_rows(&rows, &filter)),
            vec!["TOTAL", "Receitas Correntes", "Receitas de Capital"]
        );
        assert!(!filter.is_identity());
        assert!(RowFilter::default().is_identity());
    }

    #[test]
    fn test_filter_text_and_level_combined() {
        let filter = RowFilter {
            texto: "Impostos".to_string(),
            nivel_maximo: 2,
        };
        let rows = tree();
        assert_eq!(
            descriptions(&filter_rows(&rows, &filter)),
            vec!["TOTAL", "Receitas Correntes", "Impostos"]
        );
    }

    #[test]
    fn test_filter_without_match_is_empty() {
        let filter = RowFilter {
            texto: "inexistente".to_string(),
            ..Default::default()
        };
        assert!(filter_rows(&tree(), &filter).is_empty());
    }

    #[test]
    fn test_build_rows() {
        let mut rows = tree();
        rows[6].variacao_absoluta = Some(-5.0);
        rows[6].cofonte = Some("500".to_string());
        rows[6].coalinea = Some("1121".to_string());
        let views = build_rows(&rows, &CLASSES);

        assert_eq!(views[0].label, "TOTAL");
        assert_eq!(views[0].row_class, "nivel-0");
        assert_eq!(views[2].values[0], "1.000,00");
        assert_eq!(views[2].values[1], "0,00");
        assert_eq!(views[2].values[5], "20,00%");
        assert_eq!(views[2].variance_class, "positivo");
        assert_eq!(views[6].variance_class, "negativo");
        assert_eq!(
            views[6].drilldown,
            Some(("500".to_string(), "1121".to_string()))
        );
    }

    #[test]
    fn test_table_state() {
        assert_eq!(table_state(true, false, vec![], "vazio"), TableState::Loading);
        assert_eq!(table_state(false, false, vec![], "vazio"), TableState::Initial);
        assert_eq!(table_state(false, true, vec![], "vazio"), TableState::Empty("vazio"));
        let views = build_rows(&tree(), &CLASSES);
        assert!(matches!(table_state(true, true, views, "vazio"), TableState::Rows(_)));
    }

    #[test]
    fn test_csv_row_matches_headers() {
        let r = row(2, "1.1", "Impostos");
        assert_eq!(r.to_csv_row().len(), LinhaRelatorio::headers().len());
        assert_eq!(to_sheet_row(&r).len(), sheet_headers().len());
    }
}
