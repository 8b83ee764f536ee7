// ==========================================
// 出口预算表 - 字段映射器
// ==========================================
// 职责: 原始行（中文表头）→ 基础资料记录 + 类型转换
// 列名支持别名（两版工作簿表头不完全一致）
// ==========================================

use crate::domain::reference::{ExchangeRateInfo, FreightRates, HsInfo, ProductInfo};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;

/// 工作表名称
pub mod sheet_names {
    pub const PRODUCT: &str = "商品信息表";
    pub const HS: &str = "HS表";
    pub const FREIGHT: &str = "运费单价表";
    pub const EXCHANGE_RATE: &str = "汇率表";
}

/// 视为空值的占位文本
const EMPTY_MARKERS: [&str; 3] = ["无", "-", "/"];

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 商品信息表
    // ==========================================
    pub fn map_product(&self, row: &RawRow, row_number: usize) -> ImportResult<ProductInfo> {
        let table = sheet_names::PRODUCT;
        Ok(ProductInfo {
            product_code: self.require_string(row, "商品编号", table, row_number)?,
            name_cn: self.require_string(row, "商品名称", table, row_number)?,
            name_en: self.get_string(row, "英文名称"),
            goods_type: self.get_string(row, "货物类型"),
            model: self.get_string(row, "规格型号(中文)"),
            purchase_price: self.parse_f64(row, "采购单价(本币)", table, row_number)?,
            sales_unit: self.get_string(row, "销售单位"),
            unit_conversion: self.get_raw(row, "单位换算"),
            package_unit: self.get_string(row, "包装单位"),
            gross_weight: self.get_raw(row, "毛重"),
            net_weight: self.get_raw(row, "净重"),
            volume: self.get_raw(row, "体积"),
            transport_note: self.get_string(row, "运输说明"),
            hs_code: self.get_string(row, "HS编码"),
        })
    }

    // ==========================================
    // HS表
    // ==========================================
    pub fn map_hs(&self, row: &RawRow, row_number: usize) -> ImportResult<HsInfo> {
        let table = sheet_names::HS;
        Ok(HsInfo {
            hs_code: self.require_string(row, "HS编码", table, row_number)?,
            name: self.get_string(row, "商品名称"),
            customs_condition: self.get_string(row, "监管条件"),
            inspection_category: self.get_string(row, "检验检疫类别"),
            vat_rate_percent: self.require_f64(row, "增值税率", table, row_number)?,
            export_tax_rate_percent: self
                .parse_f64(row, "出口税率", table, row_number)?
                .unwrap_or(0.0),
            export_rebate_rate_percent: self.require_f64(row, "出口退税率", table, row_number)?,
        })
    }

    // ==========================================
    // 运费单价表
    // ==========================================
    pub fn map_freight(&self, row: &RawRow, row_number: usize) -> ImportResult<FreightRates> {
        let table = sheet_names::FREIGHT;
        Ok(FreightRates {
            route: self.require_string(row, "航线", table, row_number)?,
            port_of_loading: self.get_string(row, "装运港"),
            port_of_destination: self.get_string(row, "目的港"),
            gp20: self.require_f64(row, "20'GP", table, row_number)?,
            gp40: self.require_f64(row, "40'GP", table, row_number)?,
            hc40: self.require_f64(row, "40'HC", table, row_number)?,
            rf20: self.require_f64(row, "20'RF", table, row_number)?,
            rf40: self.require_f64(row, "40'RF", table, row_number)?,
            rh40: self.require_f64(row, "40'RH", table, row_number)?,
        })
    }

    // ==========================================
    // 汇率表
    // ==========================================
    pub fn map_exchange_rate(
        &self,
        row: &RawRow,
        row_number: usize,
    ) -> ImportResult<ExchangeRateInfo> {
        let table = sheet_names::EXCHANGE_RATE;
        Ok(ExchangeRateInfo {
            local_currency: self.require_string(row, "本币(英文)", table, row_number)?,
            settlement_currency: self.require_string(row, "结算币种(英文)", table, row_number)?,
            rate: self.require_f64(row, "汇率", table, row_number)?,
        })
    }

    /// 行中某列的值（按别名匹配，去除空白，空值/占位文本返回 None）
    pub fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        self.lookup(row, key)
            .filter(|v| !EMPTY_MARKERS.contains(&v.as_str()))
    }

    /// 自由文本列原样保留（缺失时为空串，留给核算前的数值提取处理）
    fn get_raw(&self, row: &RawRow, key: &str) -> String {
        self.lookup(row, key).unwrap_or_default()
    }

    fn lookup(&self, row: &RawRow, key: &str) -> Option<String> {
        for alias in aliases(key) {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn require_string(
        &self,
        row: &RawRow,
        key: &str,
        table: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| ImportError::FieldMissing {
                table: table.to_string(),
                row: row_number,
                field: key.to_string(),
            })
    }

    /// 解析浮点数（允许千分位逗号和百分号）
    fn parse_f64(
        &self,
        row: &RawRow,
        key: &str,
        table: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                let cleaned: String = value
                    .trim_end_matches('%')
                    .chars()
                    .filter(|c| *c != ',')
                    .collect();
                cleaned
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| ImportError::TypeConversionError {
                        table: table.to_string(),
                        row: row_number,
                        field: key.to_string(),
                        message: format!("无法解析为数值: {}", value),
                    })
            }
        }
    }

    fn require_f64(
        &self,
        row: &RawRow,
        key: &str,
        table: &str,
        row_number: usize,
    ) -> ImportResult<f64> {
        self.parse_f64(row, key, table, row_number)?
            .ok_or_else(|| ImportError::FieldMissing {
                table: table.to_string(),
                row: row_number,
                field: key.to_string(),
            })
    }
}

/// 列名别名
fn aliases(key: &str) -> Vec<&str> {
    match key {
        "规格型号(中文)" => vec!["规格型号(中文)", "规格型号"],
        "采购单价(本币)" => vec!["采购单价(本币)", "采购单价"],
        "运输说明" => vec!["运输说明", "运输要求"],
        "监管条件" => vec!["监管条件", "海关监管条件"],
        "增值税率" => vec!["增值税率", "增值税率(%)"],
        "出口退税率" => vec!["出口退税率", "出口退税率(%)"],
        "20'GP" => vec!["20'GP普柜", "20'GP"],
        "40'GP" => vec!["40'GP普柜", "40'GP"],
        "40'HC" => vec!["40'HC普柜", "40'HC"],
        "20'RF" => vec!["20'RF冻柜", "20'RF"],
        "40'RF" => vec!["40'RF冻柜", "40'RF"],
        "40'RH" => vec!["40'RH冻柜", "40'RH"],
        "本币(英文)" => vec!["本币(英文)", "本币"],
        "结算币种(英文)" => vec!["结算币种(英文)", "结算币种"],
        _ => vec![key],
    }
}
