use crate::shared::report::filters::TipoPolicy;

/// Paths of the endpoints every report module exposes
#[derive(Debug, Clone, Copy)]
pub struct ReportEndpoints {
    pub filtros: &'static str,
    pub gerar: &'static str,
    pub exportar: &'static str,
}

/// Static description of a report page
#[derive(Debug)]
pub struct ReportModuleConfig {
    /// Key under which the page publishes its state in the app context
    pub key: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub endpoints: ReportEndpoints,
    /// localStorage key of the last filter selection
    pub storage_key: &'static str,
    pub tipo_policy: TipoPolicy,
    /// DOM id of the element captured by the image export
    pub container_id: &'static str,
    pub table_id: &'static str,
    /// CSS class per hierarchy level (0 = totals .. 4 = UG)
    pub level_classes: [&'static str; 5],
    pub file_prefix: &'static str,
    pub sheet_name: &'static str,
    /// Spreadsheet column widths, in characters
    pub column_widths: &'static [u32],
    pub description_header: &'static str,
}
