//! Навигация по иерархии: путь drill-down и производные уровень/метка

use contracts::dashboards::d410_drilldown::{
    build_params, level_label, DrillPathEntry, DrilldownFilters, HierarchyDefinition,
    QueryParameters,
};
use contracts::enums::AnalysisMode;

/// Путь drill-down для одного режима анализа.
///
/// Все операции безопасны: выход за границы иерархии игнорируется,
/// недостающая метка заменяется на fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HierarchyNavigator {
    mode: AnalysisMode,
    path: Vec<DrillPathEntry>,
}

impl HierarchyNavigator {
    pub fn new(mode: AnalysisMode) -> Self {
        Self {
            mode,
            path: Vec::new(),
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn path(&self) -> &[DrillPathEntry] {
        &self.path
    }

    /// 1-based уровень: корень = 1
    pub fn current_level(&self) -> usize {
        self.path.len() + 1
    }

    pub fn current_label(&self) -> &'static str {
        level_label(self.mode, self.current_level())
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Можно ли спуститься ниже текущего уровня
    pub fn can_drill(&self) -> bool {
        HierarchyDefinition::for_mode(self.mode)
            .is_some_and(|h| self.current_level() < h.depth())
    }

    /// Спуск в узел; на последнем уровне иерархии ничего не делает.
    /// Возвращает `true`, если путь изменился.
    pub fn drill_into(&mut self, entry: DrillPathEntry) -> bool {
        if !self.can_drill() {
            return false;
        }
        log::debug!(
            "drill into {} '{}' at level {}",
            self.current_label(),
            entry.name,
            self.current_level()
        );
        self.path.push(entry);
        true
    }

    /// Обрезает путь до длины `index` (0 = корень)
    pub fn ascend_to(&mut self, index: usize) -> bool {
        if index >= self.path.len() {
            return false;
        }
        self.path.truncate(index);
        true
    }

    pub fn ascend_one(&mut self) -> bool {
        self.path.pop().is_some()
    }

    pub fn reset(&mut self) {
        self.path.clear();
    }

    /// Смена режима анализа начинает путь заново
    pub fn set_mode(&mut self, mode: AnalysisMode) {
        if self.mode != mode {
            self.mode = mode;
            self.path.clear();
        }
    }

    pub fn parent_keys(&self) -> Vec<String> {
        self.path.iter().map(|e| e.key.clone()).collect()
    }

    /// Параметры запроса для режима `mode`.
    ///
    /// Путь принадлежит режиму навигатора: если `mode` уже другой, запрос
    /// строится от корня, как после `set_mode`.
    pub fn query_params(&self, filters: &DrilldownFilters, mode: AnalysisMode) -> QueryParameters {
        if self.mode != mode {
            return build_params(filters, mode, 1, &[]);
        }
        build_params(filters, mode, self.current_level(), &self.parent_keys())
    }
}
