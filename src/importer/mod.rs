// ==========================================
// 出口预算表 - 基础资料导入层
// ==========================================
// 职责: 抓取商品信息表 / HS表 / 运费单价表 / 汇率表
// 支持: Excel 工作簿, CSV 目录, 内置样例
// ==========================================

// 模块声明
pub mod data_source_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod sample_source;
pub mod workbook_source;

// 重导出核心类型
pub use data_source_trait::ReferenceDataSource;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{sheet_names, FieldMapper};
pub use file_parser::{
    CsvDirectoryReader, CsvParser, ExcelWorkbookReader, RawRow, TableReader, UniversalTableReader,
};
pub use sample_source::SampleDataSource;
pub use workbook_source::WorkbookDataSource;
