//! Статическая таблица иерархий drill-down по режимам анализа

use crate::enums::analysis_mode::AnalysisMode;

/// Метка уровня, когда режим неизвестен или уровень глубже иерархии
pub const FALLBACK_LEVEL_LABEL: &str = "Details";

/// Упорядоченные метки уровней одной иерархии
#[derive(Debug, Clone, Copy)]
pub struct HierarchyDefinition {
    pub mode: AnalysisMode,
    pub labels: &'static [&'static str],
}

const HIERARCHIES: &[HierarchyDefinition] = &[
    HierarchyDefinition {
        mode: AnalysisMode::Supervisor,
        labels: &["Supervisor", "Vendedor", "Cliente", "Produto"],
    },
    HierarchyDefinition {
        mode: AnalysisMode::Region,
        labels: &["Região", "Supervisor", "Vendedor", "Cliente", "Produto"],
    },
    HierarchyDefinition {
        mode: AnalysisMode::CustomerGroup,
        labels: &["Grupo de Clientes", "Cliente", "Produto"],
    },
    HierarchyDefinition {
        mode: AnalysisMode::Seller,
        labels: &["Vendedor", "Cliente", "Produto"],
    },
    HierarchyDefinition {
        mode: AnalysisMode::Product,
        labels: &["Produto", "Cliente"],
    },
];

impl HierarchyDefinition {
    pub fn for_mode(mode: AnalysisMode) -> Option<&'static HierarchyDefinition> {
        HIERARCHIES.iter().find(|h| h.mode == mode)
    }

    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    /// Метка для 1-based уровня; `None` вне диапазона
    pub fn label_at(&self, level: usize) -> Option<&'static str> {
        level
            .checked_sub(1)
            .and_then(|idx| self.labels.get(idx))
            .copied()
    }
}

/// Метка уровня с откатом на [`FALLBACK_LEVEL_LABEL`]
pub fn level_label(mode: AnalysisMode, level: usize) -> &'static str {
    HierarchyDefinition::for_mode(mode)
        .and_then(|h| h.label_at(level))
        .unwrap_or(FALLBACK_LEVEL_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_has_hierarchy() {
        for mode in AnalysisMode::all() {
            let def = HierarchyDefinition::for_mode(mode).expect("hierarchy missing");
            assert!(def.depth() >= 1);
        }
    }

    #[test]
    fn test_level_label() {
        assert_eq!(level_label(AnalysisMode::Supervisor, 1), "Supervisor");
        assert_eq!(level_label(AnalysisMode::Supervisor, 2), "Vendedor");
        assert_eq!(level_label(AnalysisMode::Region, 5), "Produto");
    }

    #[test]
    fn test_level_label_out_of_range() {
        assert_eq!(level_label(AnalysisMode::Supervisor, 0), FALLBACK_LEVEL_LABEL);
        assert_eq!(level_label(AnalysisMode::Supervisor, 5), FALLBACK_LEVEL_LABEL);
        assert_eq!(level_label(AnalysisMode::Product, 99), FALLBACK_LEVEL_LABEL);
    }
}
