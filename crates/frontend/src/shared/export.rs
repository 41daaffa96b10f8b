//! Client-side export: CSV, XLSX (SheetJS) and PNG (html2canvas).
//!
//! The spreadsheet and canvas libraries are loaded by `index.html`, which also
//! defines the two glue functions bound below.
use crate::shared::config::{MSG_SEM_DADOS_EXPORTAR, PNG_SCALE};
use crate::shared::error::AppError;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

#[wasm_bindgen]
extern "C" {
    /// `writeXlsxWorkbook({name, column_widths, rows}, filename)`
    #[wasm_bindgen(js_name = writeXlsxWorkbook, catch)]
    fn write_xlsx_workbook(sheet: JsValue, filename: &str) -> Result<(), JsValue>;

    /// `captureElementPng(element, scale)` resolves to a `data:image/png` URL
    #[wasm_bindgen(js_name = captureElementPng, catch)]
    fn capture_element_png(element: &web_sys::Element, scale: f64) -> Result<js_sys::Promise, JsValue>;
}

/// Types that can be written as a CSV / spreadsheet row
pub trait CsvExportable {
    fn headers() -> Vec<&'static str>;

    fn to_csv_row(&self) -> Vec<String>;
}

/// Semicolon-separated CSV prefixed with a UTF-8 BOM so Excel picks the encoding
pub fn build_csv<T: CsvExportable>(data: &[T]) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Render(MSG_SEM_DADOS_EXPORTAR.to_string()));
    }

    let mut csv_content = String::from('\u{FEFF}');
    csv_content.push_str(&T::headers().join(";"));
    csv_content.push('\n');

    for item in data {
        let row: Vec<String> = item
            .to_csv_row()
            .iter()
            .map(|cell| escape_csv_cell(cell))
            .collect();
        csv_content.push_str(&row.join(";"));
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Quotes a cell containing the separator, quotes or line breaks
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Builds the CSV and triggers the browser download
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), AppError> {
    let content = build_csv(data)?;
    let blob = create_blob(&content, "text/csv;charset=utf-8;")?;
    download_blob(&blob, filename)
}

/// Spreadsheet cell: numbers stay numeric so Excel can sum them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SheetCell {
    Text(String),
    Number(f64),
}

impl From<&str> for SheetCell {
    fn from(value: &str) -> Self {
        SheetCell::Text(value.to_string())
    }
}

impl From<String> for SheetCell {
    fn from(value: String) -> Self {
        SheetCell::Text(value)
    }
}

impl From<Option<f64>> for SheetCell {
    fn from(value: Option<f64>) -> Self {
        SheetCell::Number(value.unwrap_or(0.0))
    }
}

/// Single-sheet workbook handed to SheetJS
#[derive(Debug, Clone, Serialize)]
pub struct XlsxSheet {
    pub name: String,
    /// Column widths in characters (`wch`)
    pub column_widths: Vec<u32>,
    /// First row is the header
    pub rows: Vec<Vec<SheetCell>>,
}

impl XlsxSheet {
    pub fn new(name: &str, column_widths: &[u32], headers: &[&str]) -> Self {
        Self {
            // Excel rejects sheet names longer than 31 characters
            name: name.chars().take(31).collect(),
            column_widths: column_widths.to_vec(),
            rows: vec![headers.iter().map(|h| SheetCell::from(*h)).collect()],
        }
    }

    pub fn push_row(&mut self, row: Vec<SheetCell>) {
        self.rows.push(row);
    }

    pub fn data_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

pub fn export_to_xlsx(sheet: &XlsxSheet, filename: &str) -> Result<(), AppError> {
    if sheet.data_rows() == 0 {
        return Err(AppError::Render(MSG_SEM_DADOS_EXPORTAR.to_string()));
    }
    let value = serde_wasm_bindgen::to_value(sheet)
        .map_err(|e| AppError::Render(format!("Falha ao preparar planilha: {}", e)))?;
    write_xlsx_workbook(value, filename)
        .map_err(|e| AppError::Render(format!("Falha ao gerar planilha: {:?}", e)))
}

/// Rasterizes the element with `element_id` and downloads it as PNG
pub async fn export_element_png(element_id: &str, filename: &str) -> Result<(), AppError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Render("No document object".to_string()))?;
    let element = document
        .get_element_by_id(element_id)
        .ok_or_else(|| AppError::Render(format!("Elemento #{} não encontrado", element_id)))?;

    let promise = capture_element_png(&element, PNG_SCALE)
        .map_err(|e| AppError::Render(format!("Falha ao capturar imagem: {:?}", e)))?;
    let data_url = JsFuture::from(promise)
        .await
        .map_err(|e| AppError::Render(format!("Falha ao capturar imagem: {:?}", e)))?
        .as_string()
        .ok_or_else(|| AppError::Render("Captura não retornou uma imagem".to_string()))?;

    download_url(&data_url, filename)
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, AppError> {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| AppError::Render(format!("Failed to create blob: {:?}", e)))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), AppError> {
    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| AppError::Render(format!("Failed to create object URL: {:?}", e)))?;
    let result = download_url(&url, filename);
    let _ = Url::revoke_object_url(&url);
    result
}

/// Clicks a hidden anchor pointing at `url` (object URL or data URL)
fn download_url(url: &str, filename: &str) -> Result<(), AppError> {
    let dom_err = |what: &str, e: JsValue| AppError::Render(format!("{}: {:?}", what, e));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Render("No document object".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| AppError::Render("No body element".to_string()))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| dom_err("Failed to create anchor", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| dom_err("Failed to cast to anchor", e.into()))?;

    anchor.set_href(url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| dom_err("Failed to set style", e))?;

    body.append_child(&anchor)
        .map_err(|e| dom_err("Failed to append anchor", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| dom_err("Failed to remove anchor", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        conta: &'static str,
        valor: &'static str,
    }

    impl CsvExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Conta", "Valor"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.conta.to_string(), self.valor.to_string()]
        }
    }

    #[test]
    fn test_build_csv_has_bom_and_semicolons() {
        let rows = [
            Row { conta: "621200000", valor: "1.520,75" },
            Row { conta: "Receita; \"bruta\"", valor: "0,00" },
        ];
        let csv = build_csv(&rows).unwrap();
        assert!(csv.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], "Conta;Valor");
        assert_eq!(lines[1], "621200000;1.520,75");
        assert_eq!(lines[2], "\"Receita; \"\"bruta\"\"\";0,00");
    }

    #[test]
    fn test_build_csv_rejects_empty() {
        let rows: [Row; 0] = [];
        assert!(matches!(build_csv(&rows), Err(AppError::Render(_))));
    }

    #[test]
    fn test_sheet_name_truncated_and_header_row() {
        let mut sheet = XlsxSheet::new(
            "Relatório de Receita por Fonte e Alínea",
            &[40, 18],
            &["Descrição", "Valor"],
        );
        assert_eq!(sheet.name.chars().count(), 31);
        assert_eq!(sheet.data_rows(), 0);
        sheet.push_row(vec!["Impostos".into(), Some(10.5).into()]);
        assert_eq!(sheet.data_rows(), 1);
        assert_eq!(sheet.rows[1][1], SheetCell::Number(10.5));
    }

    #[test]
    fn test_sheet_cell_serializes_untagged() {
        let json = serde_json::to_string(&vec![SheetCell::from("a"), SheetCell::Number(1.5)]).unwrap();
        assert_eq!(json, r#"["a",1.5]"#);
    }
}
