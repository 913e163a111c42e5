// 🏗️ Sales demo dataset - hardware store, January to June 2024
// Built once per process and shared by every render pass.

use crate::stats::round1;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

fn serialize_date<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.format(DATE_FORMAT).to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySales {
    #[serde(rename = "Mes")]
    pub month: &'static str,
    #[serde(rename = "Ventas")]
    pub sales: u32,
    #[serde(rename = "Costos")]
    pub costs: u32,
    #[serde(rename = "Clientes")]
    pub customers: u32,
    /// Gross margin in percent, one decimal
    #[serde(rename = "Margen")]
    pub margin: f64,
}

impl MonthlySales {
    fn new(month: &'static str, sales: u32, costs: u32, customers: u32) -> Self {
        let margin = if sales == 0 {
            0.0
        } else {
            round1((sales as f64 - costs as f64) / sales as f64 * 100.0)
        };
        MonthlySales { month, sales, costs, customers, margin }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(rename = "Producto")]
    pub name: &'static str,
    #[serde(rename = "Ventas")]
    pub sales: u32,
    #[serde(rename = "Stock")]
    pub stock: u32,
    #[serde(rename = "Categoria")]
    pub category: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    #[serde(rename = "Categoria")]
    pub category: &'static str,
    #[serde(rename = "Porcentaje")]
    pub percentage: u32,
}

/// Alert level assigned to a low-stock product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertLevel {
    #[serde(rename = "Crítico")]
    Critical,
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Medio")]
    Medium,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "Crítico",
            AlertLevel::Low => "Bajo",
            AlertLevel::Medium => "Medio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockAlert {
    #[serde(rename = "Producto")]
    pub product: &'static str,
    #[serde(rename = "Stock")]
    pub stock: u32,
    #[serde(rename = "Nivel")]
    pub level: AlertLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentSale {
    #[serde(rename = "ID")]
    pub id: &'static str,
    #[serde(rename = "Cliente")]
    pub customer: &'static str,
    #[serde(rename = "Monto")]
    pub amount: u32,
    #[serde(rename = "Fecha", serialize_with = "serialize_date")]
    pub date: NaiveDate,
}

impl RecentSale {
    pub fn date_display(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesData {
    pub monthly: Vec<MonthlySales>,
    pub products: Vec<Product>,
    pub categories: Vec<CategoryShare>,
    pub alerts: Vec<StockAlert>,
    pub recent_sales: Vec<RecentSale>,
    pub registered_customers: u32,
    pub new_customers: u32,
    pub new_customers_change: &'static str,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl SalesData {
    pub fn demo() -> Self {
        let monthly = vec![
            MonthlySales::new("Enero", 45000, 28000, 120),
            MonthlySales::new("Febrero", 52000, 31000, 135),
            MonthlySales::new("Marzo", 48000, 29000, 128),
            MonthlySales::new("Abril", 61000, 35000, 156),
            MonthlySales::new("Mayo", 58000, 33000, 148),
            MonthlySales::new("Junio", 67000, 38000, 172),
        ];

        let product = |name, sales, stock, category| Product { name, sales, stock, category };
        let products = vec![
            product("Cemento 50kg", 8500, 45, "Materiales"),
            product("Pintura látex 20L", 6200, 23, "Pinturería"),
            product("Hierro 12mm x6m", 5800, 67, "Materiales"),
            product("Alambre tejido", 4200, 12, "Materiales"),
            product("Ladrillos comunes", 3900, 89, "Materiales"),
        ];

        let categories = vec![
            CategoryShare { category: "Materiales", percentage: 45 },
            CategoryShare { category: "Herramientas", percentage: 25 },
            CategoryShare { category: "Pinturería", percentage: 20 },
            CategoryShare { category: "Otros", percentage: 10 },
        ];

        let alerts = vec![
            StockAlert { product: "Alambre tejido", stock: 12, level: AlertLevel::Critical },
            StockAlert { product: "Pintura látex 20L", stock: 23, level: AlertLevel::Low },
            StockAlert { product: "Cemento 50kg", stock: 45, level: AlertLevel::Medium },
        ];

        let sale = |id, customer, amount, date| RecentSale { id, customer, amount, date };
        let recent_sales = vec![
            sale("V-1245", "Constructora Lopez", 12500, date(2024, 6, 15)),
            sale("V-1246", "Juan Pérez", 3400, date(2024, 6, 15)),
            sale("V-1247", "Obras Martinez", 8900, date(2024, 6, 14)),
            sale("V-1248", "María González", 1200, date(2024, 6, 14)),
            sale("V-1249", "Roberto Sánchez", 5600, date(2024, 6, 13)),
        ];

        SalesData {
            monthly,
            products,
            categories,
            alerts,
            recent_sales,
            registered_customers: 452,
            new_customers: 28,
            new_customers_change: "+12%",
        }
    }
}

/// Process-wide dataset, built on first use
pub fn dataset() -> &'static SalesData {
    static DATA: OnceLock<SalesData> = OnceLock::new();
    DATA.get_or_init(SalesData::demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_are_derived() {
        let data = SalesData::demo();
        let margins: Vec<f64> = data.monthly.iter().map(|m| m.margin).collect();
        assert_eq!(margins, vec![37.8, 40.4, 39.6, 42.6, 43.1, 43.3]);
    }

    #[test]
    fn test_zero_sales_margin() {
        assert_eq!(MonthlySales::new("X", 0, 10, 0).margin, 0.0);
    }

    #[test]
    fn test_dataset_is_cached() {
        let a = dataset() as *const SalesData;
        let b = dataset() as *const SalesData;
        assert_eq!(a, b);
        assert_eq!(dataset().recent_sales[0].date_display(), "15/06/2024");
    }

    #[test]
    fn test_alerts_reference_catalog_products() {
        let data = dataset();
        for alert in &data.alerts {
            let product = data.products.iter().find(|p| p.name == alert.product);
            assert_eq!(product.map(|p| p.stock), Some(alert.stock));
        }
    }
}
