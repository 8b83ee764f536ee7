// ==========================================
// 出口预算表 - 基础资料文件解析器
// ==========================================
// 支持: Excel 工作簿 (.xlsx/.xls/.ods，按工作表名读取)
//       CSV 目录（每张表一个 <表名>.csv）
// 输出: 以表头为键的原始行
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 原始行：表头 → 单元格文本（已去除首尾空白）
pub type RawRow = HashMap<String, String>;

// ==========================================
// TableReader Trait
// ==========================================
// 用途: 按表名读取一张基础资料表
// 实现者: ExcelWorkbookReader, CsvDirectoryReader
pub trait TableReader: Send + Sync {
    /// 读取指定表的全部数据行（跳过完全空白的行）
    fn read_table(&self, sheet: &str) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_file(&self, path: &Path) -> ImportResult<Vec<RawRow>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // Excel 另存的 CSV 可能带 BOM
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row = build_row(&headers, record.iter().map(str::to_string));
            if let Some(row) = row {
                records.push(row);
            }
        }

        Ok(records)
    }
}

// ==========================================
// CSV 目录读取器
// ==========================================
pub struct CsvDirectoryReader {
    dir: PathBuf,
}

impl CsvDirectoryReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableReader for CsvDirectoryReader {
    fn read_table(&self, sheet: &str) -> ImportResult<Vec<RawRow>> {
        let path = self.dir.join(format!("{}.csv", sheet));
        if !path.exists() {
            return Err(ImportError::SheetNotFound(path.display().to_string()));
        }
        CsvParser.parse_file(&path)
    }
}

// ==========================================
// Excel 工作簿读取器
// ==========================================
pub struct ExcelWorkbookReader {
    path: PathBuf,
}

impl ExcelWorkbookReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableReader for ExcelWorkbookReader {
    fn read_table(&self, sheet: &str) -> ImportResult<Vec<RawRow>> {
        if !self.path.exists() {
            return Err(ImportError::FileNotFound(self.path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(&self.path)?;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(ImportError::SheetNotFound(sheet.to_string()));
        }

        let range = workbook.worksheet_range(sheet)?;

        // 表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError(format!("{} 无表头行", sheet)))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        Ok(rows
            .filter_map(|data_row| build_row(&headers, data_row.iter().map(|c| c.to_string())))
            .collect())
    }
}

// ==========================================
// 通用读取器（根据路径自动选择）
// ==========================================
pub struct UniversalTableReader;

impl UniversalTableReader {
    /// 目录 → CSV 目录读取器；.xlsx/.xls/.xlsm/.ods → Excel 读取器
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Arc<dyn TableReader>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            return Ok(Arc::new(CsvDirectoryReader::new(path)));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" | "xls" | "xlsm" | "ods" => Ok(Arc::new(ExcelWorkbookReader::new(path))),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// 按表头组装一行；完全空白的行返回 None
fn build_row(headers: &[String], cells: impl Iterator<Item = String>) -> Option<RawRow> {
    let mut row = HashMap::new();
    for (header, value) in headers.iter().zip(cells) {
        if header.is_empty() {
            continue;
        }
        row.insert(header.clone(), value.trim().to_string());
    }

    if row.values().all(|v| v.is_empty()) {
        None
    } else {
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "\u{feff}本币(英文),结算币种(英文),汇率").unwrap();
        writeln!(temp_file, "CNY, USD ,6.9257").unwrap();

        let records = CsvParser.parse_file(temp_file.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("本币(英文)"), Some(&"CNY".to_string()));
        assert_eq!(records[0].get("结算币种(英文)"), Some(&"USD".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_file(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "商品编号,毛重").unwrap();
        writeln!(temp_file, "P010,280.00KGS/托盘").unwrap();
        writeln!(temp_file, ",").unwrap();
        writeln!(temp_file, "P011,12KGS/箱").unwrap();

        let records = CsvParser.parse_file(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_directory_missing_sheet() {
        let dir = tempdir().unwrap();
        let reader = CsvDirectoryReader::new(dir.path());
        let result = reader.read_table("HS表");
        assert!(matches!(result, Err(ImportError::SheetNotFound(_))));
    }

    #[test]
    fn test_universal_reader_rejects_unknown_extension() {
        let temp_file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalTableReader::open(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_universal_reader_accepts_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("汇率表.csv"), "汇率\n6.9\n").unwrap();

        let reader = UniversalTableReader::open(dir.path()).unwrap();
        let rows = reader.read_table("汇率表").unwrap();
        assert_eq!(rows[0]["汇率"], "6.9");
    }
}
