//! Optional secondary analyses fed with every generated report.
//!
//! Pages register integrations on their controller; a page without any gets
//! [`NoopIntegration`] behaviour for free.

use crate::shared::format::{format_currency, format_percent};
use contracts::reports::relatorio::{LinhaRelatorio, RelatorioResponse};

/// Rendered output of an integration
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationPanel {
    pub title: &'static str,
    pub lines: Vec<PanelLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLine {
    pub label: String,
    pub value: String,
    /// "positivo" / "negativo" / ""
    pub css_class: &'static str,
}

pub trait ReportIntegration: Send + Sync {
    /// Called with the same payload the table is rendered from
    fn integrate(&mut self, report: &RelatorioResponse);

    /// Drops everything derived from the last report
    fn destroy(&mut self);

    fn panel(&self) -> Option<IntegrationPanel> {
        None
    }
}

#[derive(Debug, Default)]
pub struct NoopIntegration;

impl ReportIntegration for NoopIntegration {
    fn integrate(&mut self, _report: &RelatorioResponse) {}

    fn destroy(&mut self) {}
}

fn sign_class(value: f64) -> &'static str {
    if value > 0.0 {
        "positivo"
    } else if value < 0.0 {
        "negativo"
    } else {
        ""
    }
}

/// Visual analysis: rows at `nivel` with the largest absolute variance
#[derive(Debug)]
pub struct VariationHighlights {
    nivel: u8,
    limit: usize,
    top: Vec<LinhaRelatorio>,
}

impl VariationHighlights {
    pub fn new(nivel: u8, limit: usize) -> Self {
        Self {
            nivel,
            limit,
            top: Vec::new(),
        }
    }
}

impl ReportIntegration for VariationHighlights {
    fn integrate(&mut self, report: &RelatorioResponse) {
        let mut rows: Vec<LinhaRelatorio> = report
            .dados
            .iter()
            .filter(|row| row.nivel == self.nivel && row.variacao_absoluta.is_some())
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let a = a.variacao_absoluta.unwrap_or(0.0).abs();
            let b = b.variacao_absoluta.unwrap_or(0.0).abs();
            b.total_cmp(&a)
        });
        rows.truncate(self.limit);
        self.top = rows;
    }

    fn destroy(&mut self) {
        self.top.clear();
    }

    fn panel(&self) -> Option<IntegrationPanel> {
        if self.top.is_empty() {
            return None;
        }
        Some(IntegrationPanel {
            title: "Maiores variações",
            lines: self
                .top
                .iter()
                .map(|row| {
                    let variacao = row.variacao_absoluta.unwrap_or(0.0);
                    PanelLine {
                        label: row.descricao.clone(),
                        value: format!(
                            "{} ({})",
                            format_currency(Some(variacao)),
                            format_percent(row.variacao_percentual)
                        ),
                        css_class: sign_class(variacao),
                    }
                })
                .collect(),
        })
    }
}

/// Current vs prior period totals and the share of each level-1 category
#[derive(Debug, Default)]
pub struct MonthlyComparison {
    total_atual: Option<f64>,
    total_anterior: Option<f64>,
    shares: Vec<(String, f64)>,
}

impl MonthlyComparison {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportIntegration for MonthlyComparison {
    fn integrate(&mut self, report: &RelatorioResponse) {
        let total = report.dados.iter().find(|row| row.is_total());
        let categorias: Vec<&LinhaRelatorio> =
            report.dados.iter().filter(|row| row.nivel == 1).collect();

        // without a totals row the level-1 rows are the whole report
        let total_atual = total
            .and_then(|t| t.receita_atual)
            .or_else(|| {
                (!categorias.is_empty())
                    .then(|| categorias.iter().map(|r| r.receita_atual.unwrap_or(0.0)).sum())
            });
        let total_anterior = total.and_then(|t| t.receita_anterior).or_else(|| {
            (!categorias.is_empty())
                .then(|| categorias.iter().map(|r| r.receita_anterior.unwrap_or(0.0)).sum())
        });

        self.shares = match total_atual {
            Some(total) if total != 0.0 => categorias
                .iter()
                .map(|row| {
                    (
                        row.descricao.clone(),
                        row.receita_atual.unwrap_or(0.0) / total * 100.0,
                    )
                })
                .collect(),
            _ => Vec::new(),
        };
        self.total_atual = total_atual;
        self.total_anterior = total_anterior;
    }

    fn destroy(&mut self) {
        *self = Self::default();
    }

    fn panel(&self) -> Option<IntegrationPanel> {
        let atual = self.total_atual?;
        let anterior = self.total_anterior.unwrap_or(0.0);
        let diff = atual - anterior;

        let mut lines = vec![
            PanelLine {
                label: "Período atual".to_string(),
                value: format_currency(Some(atual)),
                css_class: "",
            },
            PanelLine {
                label: "Mesmo período do ano anterior".to_string(),
                value: format_currency(Some(anterior)),
                css_class: "",
            },
            PanelLine {
                label: "Diferença".to_string(),
                value: if anterior != 0.0 {
                    format!(
                        "{} ({})",
                        format_currency(Some(diff)),
                        format_percent(Some(diff / anterior * 100.0))
                    )
                } else {
                    format_currency(Some(diff))
                },
                css_class: sign_class(diff),
            },
        ];
        lines.extend(self.shares.iter().map(|(descricao, share)| PanelLine {
            label: descricao.clone(),
            value: format_percent(Some(*share)),
            css_class: "",
        }));

        Some(IntegrationPanel {
            title: "Comparativo com o ano anterior",
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(nivel: u8, descricao: &str, atual: f64, anterior: f64) -> LinhaRelatorio {
        LinhaRelatorio {
            nivel,
            codigo: String::new(),
            descricao: descricao.to_string(),
            cofonte: None,
            coalinea: None,
            coug: None,
            previsao_inicial: None,
            previsao_atualizada: None,
            receita_atual: Some(atual),
            receita_anterior: Some(anterior),
            variacao_absoluta: Some(atual - anterior),
            variacao_percentual: if anterior != 0.0 {
                Some((atual - anterior) / anterior * 100.0)
            } else {
                None
            },
        }
    }

    fn report() -> RelatorioResponse {
        RelatorioResponse {
            dados: vec![
                row(0, "TOTAL", 400.0, 300.0),
                row(1, "Receitas Correntes", 300.0, 250.0),
                row(2, "Impostos", 200.0, 100.0),
                row(2, "Taxas", 100.0, 150.0),
                row(1, "Receitas de Capital", 100.0, 50.0),
            ],
            tem_dados: true,
            periodo: None,
            tipo: None,
        }
    }

    #[test]
    fn test_variation_highlights_orders_by_absolute_variance() {
        let mut integration = VariationHighlights::new(2, 5);
        integration.integrate(&report());
        let names: Vec<&str> = integration.top.iter().map(|r| r.descricao.as_str()).collect();
        assert_eq!(names, vec!["Impostos", "Taxas"]);

        let panel = integration.panel().unwrap();
        assert_eq!(panel.lines[1].css_class, "negativo");

        integration.destroy();
        assert!(integration.panel().is_none());
    }

    #[test]
    fn test_monthly_comparison_shares() {
        let mut integration = MonthlyComparison::new();
        integration.integrate(&report());
        assert_eq!((integration.total_atual, integration.total_anterior), (Some(400.0), Some(300.0)));
        assert_eq!(integration.shares.len(), 2);
        assert_eq!(integration.shares[0].1, 75.0);

        let panel = integration.panel().unwrap();
        assert_eq!(panel.lines[2].value, "100,00 (33,33%)");
        assert_eq!(panel.lines[2].css_class, "positivo");
    }

    #[test]
    fn test_monthly_comparison_without_total_row() {
        let mut data = report();
        data.dados.remove(0);
        let mut integration = MonthlyComparison::new();
        integration.integrate(&data);
        assert_eq!((integration.total_atual, integration.total_anterior), (Some(400.0), Some(300.0)));
    }

    #[test]
    fn test_noop_has_no_panel() {
        let mut noop = NoopIntegration;
        noop.integrate(&report());
        assert!(noop.panel().is_none());
    }
}
