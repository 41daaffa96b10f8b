pub mod r101_receita_fonte;
pub mod relatorio;
