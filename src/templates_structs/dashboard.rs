use askama::Template;

use crate::models::dashboard::{ActivityEntry, Dashboard, MonthRevenue, Overview, StageCount};

use super::{PageContext, money};

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub dashboard: Dashboard,
}

impl DashboardTemplate {
    pub fn overview(&self) -> Option<&Overview> {
        self.dashboard.overview.data()
    }

    pub fn pipeline(&self) -> Option<&Vec<StageCount>> {
        self.dashboard.pipeline.data()
    }

    pub fn revenue(&self) -> Option<&Vec<MonthRevenue>> {
        self.dashboard.revenue.data()
    }

    pub fn activity(&self) -> Option<&Vec<ActivityEntry>> {
        self.dashboard.activity.data()
    }

    pub fn money(&self, value: impl std::borrow::Borrow<f64>) -> String {
        money(*value.borrow())
    }

    /// Bar height in percent of the best month.
    pub fn revenue_height(&self, revenue: impl std::borrow::Borrow<f64>) -> u32 {
        let revenue = *revenue.borrow();
        let max = self
            .revenue()
            .map(|months| months.iter().map(|m| m.revenue).fold(0.0, f64::max))
            .unwrap_or(0.0);
        if max <= 0.0 { 0 } else { ((revenue / max) * 100.0).round() as u32 }
    }
}
