pub mod registros;

pub use registros::HttpRecordSource;
