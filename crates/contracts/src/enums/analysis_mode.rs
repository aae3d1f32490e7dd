use serde::{Deserialize, Serialize};

/// Режим анализа: какая иерархия измерений используется при drill-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    #[default]
    Supervisor,
    Region,
    CustomerGroup,
    Seller,
    Product,
}

impl AnalysisMode {
    /// Код режима, передаваемый в RPC (`p_analysis_type`)
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisMode::Supervisor => "supervisor",
            AnalysisMode::Region => "region",
            AnalysisMode::CustomerGroup => "customer_group",
            AnalysisMode::Seller => "seller",
            AnalysisMode::Product => "product",
        }
    }

    /// Человекочитаемое название для селектора режима
    pub fn display_name(&self) -> &'static str {
        match self {
            AnalysisMode::Supervisor => "Por Supervisor",
            AnalysisMode::Region => "Por Região",
            AnalysisMode::CustomerGroup => "Por Grupo de Clientes",
            AnalysisMode::Seller => "Por Vendedor",
            AnalysisMode::Product => "Por Produto",
        }
    }

    pub fn all() -> Vec<AnalysisMode> {
        vec![
            AnalysisMode::Supervisor,
            AnalysisMode::Region,
            AnalysisMode::CustomerGroup,
            AnalysisMode::Seller,
            AnalysisMode::Product,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "supervisor" => Some(AnalysisMode::Supervisor),
            "region" => Some(AnalysisMode::Region),
            "customer_group" => Some(AnalysisMode::CustomerGroup),
            "seller" => Some(AnalysisMode::Seller),
            "product" => Some(AnalysisMode::Product),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
