// ==========================================
// 集成测试共用辅助模块
// ==========================================

#![allow(dead_code)]

pub mod mock_data_source;
pub mod test_data_builder;
