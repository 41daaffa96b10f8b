pub mod page;

pub use page::BalancoReceitaPage;
