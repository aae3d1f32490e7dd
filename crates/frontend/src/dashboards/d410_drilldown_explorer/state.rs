use leptos::prelude::*;

use super::view_sync::TableSort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    Treemap,
    Bar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrilldownViewState {
    pub chart_type: ChartType,
    pub show_chart: bool,
    pub is_expanded: bool,
    /// 1-based
    pub current_page: usize,
    pub sort: TableSort,
}

impl Default for DrilldownViewState {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Treemap,
            show_chart: true,
            is_expanded: false,
            current_page: 1,
            sort: TableSort::default(),
        }
    }
}

impl DrilldownViewState {
    /// Сброс страницы при смене пути или фильтров
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }
}

pub fn create_state() -> RwSignal<DrilldownViewState> {
    RwSignal::new(DrilldownViewState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_page_clamps() {
        let mut state = DrilldownViewState::default();
        state.set_page(7, 3);
        assert_eq!(state.current_page, 3);
        state.set_page(0, 3);
        assert_eq!(state.current_page, 1);
        state.set_page(2, 0);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_sort_toggle_keeps_page() {
        let mut state = DrilldownViewState::default();
        state.set_page(2, 3);
        state.sort.toggle("name");
        assert_eq!(state.current_page, 2);
        state.reset_page();
        assert_eq!(state.current_page, 1);
    }
}
