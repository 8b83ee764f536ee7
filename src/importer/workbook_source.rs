// ==========================================
// 出口预算表 - 工作簿数据源
// ==========================================
// 从基础资料工作簿（或 CSV 目录）读取四张表
// 文件解析为阻塞操作，放到 spawn_blocking 中执行
// ==========================================

use crate::domain::reference::{ExchangeRateInfo, FreightRates, HsInfo, ProductInfo};
use crate::importer::data_source_trait::ReferenceDataSource;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{sheet_names, FieldMapper};
use crate::importer::file_parser::{RawRow, TableReader, UniversalTableReader};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 数据行号从 2 开始（第 1 行为表头）
const FIRST_DATA_ROW: usize = 2;

pub struct WorkbookDataSource {
    path: PathBuf,
    reader: Arc<dyn TableReader>,
    mapper: FieldMapper,
}

impl WorkbookDataSource {
    /// 打开工作簿文件或 CSV 目录
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let reader = UniversalTableReader::open(path)?;
        info!(path = %path.display(), "基础资料数据源已打开");
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            mapper: FieldMapper,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 在阻塞线程池中读取一张表
    async fn load_table(&self, sheet: &'static str) -> ImportResult<Vec<RawRow>> {
        let reader = Arc::clone(&self.reader);
        let rows = tokio::task::spawn_blocking(move || reader.read_table(sheet))
            .await
            .map_err(|e| ImportError::InternalError(format!("读取 {} 任务失败: {}", sheet, e)))??;
        debug!(sheet, rows = rows.len(), "工作表读取完成");
        Ok(rows)
    }

    /// 找到首个满足条件的行并映射
    fn find_and_map<T>(
        &self,
        rows: &[RawRow],
        table: &str,
        key: &str,
        matches: impl Fn(&RawRow) -> bool,
        map: impl Fn(&FieldMapper, &RawRow, usize) -> ImportResult<T>,
    ) -> ImportResult<T> {
        rows.iter()
            .enumerate()
            .find(|(_, row)| matches(row))
            .map(|(idx, row)| map(&self.mapper, row, idx + FIRST_DATA_ROW))
            .unwrap_or_else(|| {
                Err(ImportError::RecordNotFound {
                    table: table.to_string(),
                    key: key.to_string(),
                })
            })
    }
}

#[async_trait]
impl ReferenceDataSource for WorkbookDataSource {
    async fn fetch_product(&self, product_code: &str) -> ImportResult<ProductInfo> {
        let rows = self.load_table(sheet_names::PRODUCT).await?;
        self.find_and_map(
            &rows,
            sheet_names::PRODUCT,
            product_code,
            |row| self.mapper.get_string(row, "商品编号").as_deref() == Some(product_code),
            FieldMapper::map_product,
        )
    }

    async fn fetch_hs(&self, hs_code: &str) -> ImportResult<HsInfo> {
        let rows = self.load_table(sheet_names::HS).await?;
        self.find_and_map(
            &rows,
            sheet_names::HS,
            hs_code,
            |row| self.mapper.get_string(row, "HS编码").as_deref() == Some(hs_code),
            FieldMapper::map_hs,
        )
    }

    async fn fetch_freight_rates(&self) -> ImportResult<FreightRates> {
        let rows = self.load_table(sheet_names::FREIGHT).await?;
        self.find_and_map(
            &rows,
            sheet_names::FREIGHT,
            "<首条航线>",
            |_| true,
            FieldMapper::map_freight,
        )
    }

    async fn fetch_exchange_rate(
        &self,
        settlement_currency: &str,
    ) -> ImportResult<ExchangeRateInfo> {
        let rows = self.load_table(sheet_names::EXCHANGE_RATE).await?;
        self.find_and_map(
            &rows,
            sheet_names::EXCHANGE_RATE,
            settlement_currency,
            |row| {
                self.mapper
                    .get_string(row, "结算币种(英文)")
                    .is_some_and(|c| c.eq_ignore_ascii_case(settlement_currency))
            },
            FieldMapper::map_exchange_rate,
        )
    }
}
