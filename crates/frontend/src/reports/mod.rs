pub mod r100_balanco_receita;
pub mod r101_receita_fonte;
