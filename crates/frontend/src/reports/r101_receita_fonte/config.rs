use crate::shared::report::config::{ReportEndpoints, ReportModuleConfig};
use crate::shared::report::filters::TipoPolicy;
use contracts::reports::relatorio::TipoRelatorio;

pub const DETALHES_LANCAMENTOS_URL: &str = "/relatorio-receita-fonte/api/detalhes-lancamentos";

pub const KEY: &str = "r101_receita_fonte";

pub static CONFIG: ReportModuleConfig = ReportModuleConfig {
    key: KEY,
    title: "Receita por Fonte / Alínea",
    subtitle: "Receita arrecadada no exercício comparada ao mesmo período do ano anterior",
    endpoints: ReportEndpoints {
        filtros: "/relatorio-receita-fonte/api/filtros",
        gerar: "/relatorio-receita-fonte/api/gerar",
        exportar: "/relatorio-receita-fonte/api/exportar",
    },
    storage_key: "r101_receita_fonte_filtros_v1",
    tipo_policy: TipoPolicy::DefaultTo(TipoRelatorio::Fonte),
    container_id: "r101-relatorio-container",
    table_id: "r101-relatorio-tabela",
    level_classes: ["nivel-total", "nivel-fonte", "nivel-alinea", "nivel-detalhe", "nivel-ug"],
    file_prefix: "relatorio_receita_fonte",
    sheet_name: "Receita por Fonte",
    column_widths: &[14, 60, 18, 18, 18, 18, 18, 12],
    description_header: "Fonte / Alínea",
};
