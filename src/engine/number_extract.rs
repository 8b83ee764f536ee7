// ==========================================
// 出口预算表 - 自由文本数值提取
// ==========================================
// 规则: 取第一个匹配 [-+]?digits[.digits] 或 [-+]?.digits 的子串
// 未匹配时返回 0（调用方可用 try_extract_number 区分）
// 例: "280.00KGS/托盘" -> 280.0, "1 SET/PALLET" -> 1.0
// ==========================================

use regex::Regex;
use std::sync::LazyLock;

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+(?:\.\d+)?|\.\d+)").expect("数值提取正则无效")
});

/// 提取第一个数值，未找到时返回 None
pub fn try_extract_number(text: &str) -> Option<f64> {
    NUMBER_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// 提取第一个数值，未找到时返回 0
pub fn extract_number(text: &str) -> f64 {
    try_extract_number(text).unwrap_or(0.0)
}
