use crate::shared::report::config::{ReportEndpoints, ReportModuleConfig};
use crate::shared::report::filters::TipoPolicy;

pub const KEY: &str = "r100_balanco_receita";

pub static CONFIG: ReportModuleConfig = ReportModuleConfig {
    key: KEY,
    title: "Balanço Geral - Receita",
    subtitle: "Previsão e arrecadação da receita por categoria econômica",
    endpoints: ReportEndpoints {
        filtros: "/balanco-receita/api/filtros",
        gerar: "/balanco-receita/api/gerar",
        exportar: "/balanco-receita/api/exportar",
    },
    storage_key: "r100_balanco_receita_filtros_v1",
    tipo_policy: TipoPolicy::NotUsed,
    container_id: "r100-relatorio-container",
    table_id: "r100-relatorio-tabela",
    level_classes: ["nivel-total", "nivel-categoria", "nivel-origem", "nivel-especie", "nivel-ug"],
    file_prefix: "balanco_receita",
    sheet_name: "Balanço Receita",
    column_widths: &[14, 60, 18, 18, 18, 18, 18, 12],
    description_header: "Especificação da Receita",
};
