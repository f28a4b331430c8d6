//! Local UI chrome state (theme, sidebar, dashboard tab).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`chat`,
//! `dashboard`) so rendering controls can evolve independently.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Tabs of the dashboard panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Sensors,
    Machinery,
    Schedule,
}

impl DashboardTab {
    pub const ALL: [Self; 3] = [Self::Sensors, Self::Machinery, Self::Schedule];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sensors => "传感器数据",
            Self::Machinery => "农机推荐",
            Self::Schedule => "作业计划",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    pub dashboard_tab: DashboardTab,
}

impl Default for UiState {
    fn default() -> Self {
        Self { dark_mode: false, sidebar_open: true, dashboard_tab: DashboardTab::Sensors }
    }
}

impl UiState {
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }
}
