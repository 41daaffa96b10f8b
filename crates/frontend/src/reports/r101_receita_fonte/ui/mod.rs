pub mod detail_modal;
pub mod page;

pub use page::RelatorioReceitaFontePage;
