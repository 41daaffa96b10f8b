//! UI constants shared by all report pages

/// Info/success banners disappear after this delay
pub const ALERT_AUTO_DISMISS_MS: u32 = 5_000;

/// Server-side cap on line items returned by the drill-down endpoint
pub const LIMITE_LANCAMENTOS: usize = 1_000;

/// html2canvas scale used for report images
pub const PNG_SCALE: f64 = 2.0;

/// Delay before the search box applies its value
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Searches shorter than this are ignored
pub const SEARCH_MIN_CHARS: usize = 3;

/// Non-breaking spaces added per hierarchy level in row labels
pub const INDENT_PER_LEVEL: usize = 4;

pub const MSG_FILTROS_OBRIGATORIOS: &str = "Selecione o ano e o mês para gerar o relatório.";
pub const MSG_ERRO_FILTROS: &str =
    "Não foi possível carregar os filtros. Recarregue a página para tentar novamente.";
pub const MSG_ERRO_GENERICO: &str = "Erro ao processar a requisição.";
pub const MSG_SEM_DADOS: &str = "Nenhum dado encontrado para os filtros selecionados.";
pub const MSG_SEM_DADOS_EXPORTAR: &str = "Não há dados para exportar. Gere o relatório primeiro.";

/// Month names used by the month select and period labels
pub const MESES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];
