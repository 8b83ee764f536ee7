// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use export_budget::domain::container::ContainerCatalogEntry;
use export_budget::domain::shipment::ShipmentSpec;
use export_budget::domain::types::{PaymentMethod, TradeTerm, TransportRequirement};

// ==========================================
// ShipmentSpec 构建器
// ==========================================
// 默认值: 自动售货机 182 台 / 4778 元 / 2.55CBM / 280KGS / FOB / T/T / 汇率 1.368

pub struct ShipmentBuilder {
    spec: ShipmentSpec,
}

impl ShipmentBuilder {
    pub fn new() -> Self {
        Self {
            spec: ShipmentSpec {
                quantity: 182,
                unit_purchase_price: 4778.0,
                unit_gross_weight_kg: 280.0,
                unit_net_weight_kg: 220.0,
                unit_volume_cbm: 2.55,
                units_per_package: 1.0,
                vat_rate_percent: 13.0,
                export_rebate_rate_percent: 13.0,
                inspection_category: String::new(),
                trade_term: TradeTerm::Fob,
                payment_method: PaymentMethod::TelegraphicTransfer,
                exchange_rate: 1.368,
                expected_profit_rate_percent: 15.0,
                transport_requirement: TransportRequirement::Normal,
            },
        }
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.spec.quantity = quantity;
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.spec.unit_purchase_price = price;
        self
    }

    pub fn gross_weight(mut self, kg: f64) -> Self {
        self.spec.unit_gross_weight_kg = kg;
        self
    }

    pub fn volume(mut self, cbm: f64) -> Self {
        self.spec.unit_volume_cbm = cbm;
        self
    }

    pub fn units_per_package(mut self, units: f64) -> Self {
        self.spec.units_per_package = units;
        self
    }

    pub fn rates(mut self, vat: f64, rebate: f64) -> Self {
        self.spec.vat_rate_percent = vat;
        self.spec.export_rebate_rate_percent = rebate;
        self
    }

    pub fn inspection(mut self, category: &str) -> Self {
        self.spec.inspection_category = category.to_string();
        self
    }

    pub fn trade_term(mut self, term: TradeTerm) -> Self {
        self.spec.trade_term = term;
        self
    }

    pub fn payment(mut self, method: PaymentMethod) -> Self {
        self.spec.payment_method = method;
        self
    }

    pub fn exchange_rate(mut self, rate: f64) -> Self {
        self.spec.exchange_rate = rate;
        self
    }

    pub fn profit_rate(mut self, percent: f64) -> Self {
        self.spec.expected_profit_rate_percent = percent;
        self
    }

    pub fn transport(mut self, requirement: TransportRequirement) -> Self {
        self.spec.transport_requirement = requirement;
        self
    }

    pub fn build(self) -> ShipmentSpec {
        self.spec
    }
}

// ==========================================
// 集装箱目录
// ==========================================

pub fn container(
    name: &str,
    capacity_cbm: f64,
    weight_limit_kg: f64,
    unit_price_usd: f64,
    is_refrigerated: bool,
) -> ContainerCatalogEntry {
    ContainerCatalogEntry {
        name: name.to_string(),
        capacity_cbm,
        weight_limit_kg,
        unit_price_usd,
        is_refrigerated,
    }
}

/// 上海-马尼拉航线样例目录
pub fn manila_catalog() -> Vec<ContainerCatalogEntry> {
    vec![
        container("20'GP", 33.0, 25000.0, 1452.0, false),
        container("40'GP", 67.0, 29000.0, 2613.0, false),
        container("40'HC", 76.0, 29000.0, 3135.0, false),
        container("20'RF", 27.0, 27400.0, 2903.0, true),
        container("40'RF", 58.0, 27700.0, 5225.0, true),
        container("40'RH", 67.0, 29000.0, 6270.0, true),
    ]
}
