// ==========================================
// 出口预算表 - 命令行入口
// ==========================================
// 流程: 加载配置 → 打开基础资料 → 生成表单 → 覆盖交易信息 → 核算 → 输出
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use export_budget::app::AppState;
use export_budget::config::ConfigManager;
use export_budget::importer::{ReferenceDataSource, SampleDataSource, WorkbookDataSource};
use export_budget::{logging, report, ShipmentForm};

/// 出口预算表：出口成本核算、集装箱优选与报价测算
#[derive(Parser, Debug)]
#[command(name = "export-budget", version)]
#[command(about = "出口成本核算、集装箱优选与报价测算")]
pub struct Args {
    /// 配置文件路径（JSON）；未指定时依次尝试环境变量与用户配置目录
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 基础资料：Excel 工作簿或 CSV 目录；未指定时使用内置样例
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// 商品编号
    #[arg(long)]
    pub product_code: Option<String>,

    /// 交易数量
    #[arg(long)]
    pub quantity: Option<i64>,

    /// 采购单价（本币，含税）
    #[arg(long)]
    pub price: Option<f64>,

    /// 贸易术语（EXW/FCA/FAS/FOB/CFR/CIF/CIP/DAP/DPU/DDP）
    #[arg(long)]
    pub trade_term: Option<String>,

    /// 支付方式（T/T、L/C、D/P、D/A、T/T+LC）
    #[arg(long)]
    pub payment: Option<String>,

    /// 运输要求（普通/冷藏/冷冻）
    #[arg(long)]
    pub transport: Option<String>,

    /// 检验检疫类别
    #[arg(long)]
    pub inspection: Option<String>,

    /// 汇率（1 单位结算币种折合本币）
    #[arg(long)]
    pub exchange_rate: Option<f64>,

    /// 预期利润率（%）
    #[arg(long)]
    pub profit_rate: Option<f64>,

    /// 试算报价（结算币种 / 单位）；未指定时按建议报价反算
    #[arg(long)]
    pub test_price: Option<f64>,

    /// 以 JSON 输出预算报告
    #[arg(long)]
    pub json: bool,

    /// 输出当前生效的配置并退出
    #[arg(long)]
    pub print_config: bool,

    /// 日志级别（trace, debug, info, warn, error）；RUST_LOG 优先
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// 以 JSON 行格式输出日志
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// 用命令行参数覆盖表单中的交易信息
    fn apply_overrides(&self, form: &mut ShipmentForm) {
        if let Some(quantity) = self.quantity {
            form.quantity = quantity;
        }
        if let Some(price) = self.price {
            form.unit_purchase_price = price;
        }
        if let Some(trade_term) = &self.trade_term {
            form.trade_term = trade_term.clone();
        }
        if let Some(payment) = &self.payment {
            form.payment_method = payment.clone();
        }
        if let Some(transport) = &self.transport {
            form.transport_requirement = transport.clone();
        }
        if let Some(inspection) = &self.inspection {
            form.inspection_category = inspection.clone();
        }
        if let Some(rate) = self.exchange_rate {
            form.exchange_rate = rate;
        }
        if let Some(profit_rate) = self.profit_rate {
            form.expected_profit_rate_percent = profit_rate;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.log_json {
        logging::init_json(&args.log_level);
    } else {
        logging::init_with_default(&args.log_level);
    }

    tracing::info!("{} v{}", export_budget::APP_NAME, export_budget::VERSION);

    // 配置
    let config_manager =
        Arc::new(ConfigManager::load(args.config.as_deref()).context("加载配置失败")?);
    if args.print_config {
        println!("{}", config_manager.snapshot()?);
        return Ok(());
    }

    // 基础资料
    let data_source: Arc<dyn ReferenceDataSource> = match &args.data {
        Some(path) => Arc::new(
            WorkbookDataSource::open(path)
                .with_context(|| format!("打开基础资料失败: {}", path.display()))?,
        ),
        None => {
            tracing::info!("未指定基础资料，使用内置样例数据");
            Arc::new(SampleDataSource::default())
        }
    };

    let state = AppState::new(config_manager, data_source);

    let mut form = state
        .budget_api
        .load_form(args.product_code.as_deref())
        .await
        .context("加载基础资料失败")?;
    args.apply_overrides(&mut form);

    let budget_report = state
        .compute(&form, args.test_price)
        .await
        .context("核算失败")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(budget_report.as_ref())?);
    } else {
        print!("{}", report::render_text(&budget_report));
    }

    Ok(())
}
