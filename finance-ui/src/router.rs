//! Page navigation and the deferred chart initialization it triggers.

use std::time::Duration;

use finance_core::Page;
use tracing::{debug, info};

use crate::error::AppError;
use crate::scheduler::{Scheduler, TaskId};
use crate::state::AppState;

/// Time given to the analytics layout to settle before charts are sized.
pub const DEFAULT_CHART_INIT_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The page was already active; only its active markers were confirmed.
    Unchanged(Page),
    Switched {
        from: Page,
        to: Page,
        /// Chart initialization scheduled by entering the analytics page.
        chart_init: Option<TaskId>,
    },
}

pub struct ViewRouter {
    chart_init_delay: Duration,
    pending_chart_init: Option<TaskId>,
}

impl ViewRouter {
    pub fn new(chart_init_delay: Duration) -> Self {
        Self {
            chart_init_delay,
            pending_chart_init: None,
        }
    }

    /// Makes `page` the active page.
    ///
    /// Leaving a page cancels a chart initialization that has not fired yet;
    /// entering the analytics page schedules a fresh one.
    pub fn navigate(
        &mut self,
        state: &mut AppState,
        scheduler: &mut Scheduler,
        page: Page,
    ) -> Navigation {
        let from = state.current_page();
        if from == page {
            debug!(%page, "page already active");
            return Navigation::Unchanged(page);
        }

        if let Some(id) = self.pending_chart_init.take() {
            scheduler.cancel(id);
        }

        state.set_current_page(page);
        let chart_init = page.shows_charts().then(|| {
            let id = scheduler.schedule(self.chart_init_delay);
            self.pending_chart_init = Some(id);
            id
        });

        info!(%from, to = %page, "navigated");
        Navigation::Switched {
            from,
            to: page,
            chart_init,
        }
    }

    /// Navigates by page identifier, e.g. from a nav link.
    pub fn navigate_to(
        &mut self,
        state: &mut AppState,
        scheduler: &mut Scheduler,
        name: &str,
    ) -> Result<Navigation, AppError> {
        let page =
            Page::parse(name).ok_or_else(|| AppError::UnknownPage(name.trim().to_string()))?;
        Ok(self.navigate(state, scheduler, page))
    }

    /// Claims a fired chart initialization. Returns `false` if `id` is not
    /// the pending one.
    pub fn take_chart_init(
        &mut self,
        id: TaskId,
    ) -> bool {
        if self.pending_chart_init == Some(id) {
            self.pending_chart_init = None;
            true
        } else {
            false
        }
    }

    pub fn chart_init_pending(&self) -> bool {
        self.pending_chart_init.is_some()
    }
}
