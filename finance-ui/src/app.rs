//! The assistant as a whole: state plus the components that act on it.
//!
//! Every user action is a synchronous method. Deferred work (assistant
//! replies, chart initialization) fires later as timer events, which the
//! caller feeds back through [`FinanceApp::next_event`] or
//! [`FinanceApp::handle_timer`].

use chrono::Utc;
use finance_core::calculations::{BudgetAdvice, HousingInsight, budget_advice, housing_insight};
use finance_core::research::TopicUpdate;
use finance_core::{
    ChatMessage, FinancialField, FinancialModel, KeywordResponder, NewResearchTopic, Page,
    RenderSink, ResearchStore, ResearchTopic, ResponseLookup, TopicId, UserType,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::charts::{ChartRenderer, RenderReport};
use crate::chat_session::ChatSession;
use crate::config::Settings;
use crate::error::AppError;
use crate::faq::{FAQ_ITEMS, FaqAccordion, FaqItem};
use crate::models::FinancialFormModel;
use crate::router::{Navigation, ViewRouter};
use crate::scheduler::{Scheduler, TaskId};
use crate::state::AppState;

/// What a fired timer turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    AssistantReplied(ChatMessage),
    ChartsRendered(RenderReport),
    /// The task was cancelled before its firing was handled.
    Stale(TaskId),
}

pub struct FinanceApp<S: RenderSink> {
    state: AppState,
    scheduler: Scheduler,
    timers: mpsc::UnboundedReceiver<TaskId>,
    chat: ChatSession,
    router: ViewRouter,
    charts: ChartRenderer<S>,
    faq: FaqAccordion,
    form: FinancialFormModel,
}

impl<S: RenderSink> FinanceApp<S> {
    /// Starts a session with the keyword responder.
    pub fn new(
        settings: &Settings,
        sink: S,
    ) -> Self {
        Self::with_responder(settings, Box::new(KeywordResponder::default()), sink)
    }

    pub fn with_responder(
        settings: &Settings,
        responder: Box<dyn ResponseLookup>,
        sink: S,
    ) -> Self {
        let state = AppState::new(settings.chat.default_user_type);
        let form = FinancialFormModel::prefilled(state.financial_data());
        let (scheduler, timers) = Scheduler::new();

        Self {
            state,
            scheduler,
            timers,
            chat: ChatSession::new(responder, settings.reply_delay()),
            router: ViewRouter::new(settings.chart_init_delay()),
            charts: ChartRenderer::new(sink),
            faq: FaqAccordion::default(),
            form,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn charts(&self) -> &ChartRenderer<S> {
        &self.charts
    }

    pub fn form(&self) -> &FinancialFormModel {
        &self.form
    }

    pub fn faq(&self) -> &FaqAccordion {
        &self.faq
    }

    // --- navigation ---

    pub fn navigate(
        &mut self,
        page: Page,
    ) -> Navigation {
        self.router.navigate(&mut self.state, &mut self.scheduler, page)
    }

    pub fn navigate_to(
        &mut self,
        name: &str,
    ) -> Result<Navigation, AppError> {
        self.router.navigate_to(&mut self.state, &mut self.scheduler, name)
    }

    // --- chat ---

    pub fn send_message(
        &mut self,
        text: &str,
    ) -> Option<TaskId> {
        self.chat.send(&mut self.state, &mut self.scheduler, text)
    }

    pub fn send_quick_prompt(
        &mut self,
        index: usize,
    ) -> Result<TaskId, AppError> {
        self.chat.send_quick_prompt(&mut self.state, &mut self.scheduler, index)
    }

    /// Returns how many pending replies were cancelled.
    pub fn clear_chat(&mut self) -> usize {
        self.chat.clear(&mut self.state, &mut self.scheduler)
    }

    pub fn set_user_type(
        &mut self,
        user_type: UserType,
    ) {
        if self.state.user_type != user_type {
            info!(%user_type, "user mode changed");
        }
        self.state.user_type = user_type;
    }

    pub fn set_user_type_named(
        &mut self,
        name: &str,
    ) -> Result<UserType, AppError> {
        let user_type = UserType::parse(name)
            .ok_or_else(|| AppError::UnknownUserType(name.trim().to_string()))?;
        self.set_user_type(user_type);
        Ok(user_type)
    }

    // --- financial data ---

    pub fn set_form_field(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<FinancialField, AppError> {
        self.form.set(name, value)
    }

    /// Replaces the financial model with the one the form describes.
    ///
    /// On failure the current model is kept and every rejected field is
    /// reported. When the analytics page is showing, charts are redrawn at
    /// once and the report is returned.
    pub fn submit_form(&mut self) -> Result<Option<RenderReport>, AppError> {
        let model = self.form.validate_for_submit().inspect_err(|error| {
            warn!(%error, "financial data rejected");
        })?;

        self.state.replace_financial_data(model);

        let report = (self.state.current_page() == Page::Analytics)
            .then(|| self.charts.render(self.state.financial_data()));
        Ok(report)
    }

    pub fn financial_data(&self) -> &FinancialModel {
        self.state.financial_data()
    }

    pub fn budget_advice(&self) -> BudgetAdvice {
        budget_advice(self.state.financial_data())
    }

    pub fn housing_insight(&self) -> HousingInsight {
        housing_insight(self.state.financial_data())
    }

    // --- research ---

    pub fn research(&self) -> &ResearchStore {
        &self.state.research
    }

    pub fn add_research_topic(
        &mut self,
        topic: NewResearchTopic,
    ) -> Result<&ResearchTopic, AppError> {
        Ok(self.state.research.add(topic, Utc::now())?)
    }

    pub fn update_research_topic(
        &mut self,
        id: TopicId,
        update: TopicUpdate,
    ) -> Result<&ResearchTopic, AppError> {
        Ok(self.state.research.update(id, update, Utc::now())?)
    }

    pub fn delete_research_topic(
        &mut self,
        id: TopicId,
    ) -> Result<ResearchTopic, AppError> {
        Ok(self.state.research.delete(id)?)
    }

    /// Seeds the sample topics if none are saved yet.
    pub fn add_sample_topics(&mut self) -> usize {
        self.state.research.add_samples(Utc::now())
    }

    // --- faq ---

    /// Toggles FAQ item `index`; returns the item left open, if any.
    pub fn toggle_faq(
        &mut self,
        index: usize,
    ) -> Result<Option<&'static FaqItem>, AppError> {
        Ok(self.faq.toggle(index)?.and_then(|i| FAQ_ITEMS.get(i)))
    }

    // --- timers ---

    pub fn has_pending_tasks(&self) -> bool {
        self.scheduler.pending_count() > 0
    }

    /// Acts on a fired timer.
    pub fn handle_timer(
        &mut self,
        id: TaskId,
    ) -> AppEvent {
        if !self.scheduler.complete(id) {
            return AppEvent::Stale(id);
        }

        if self.chat.owns(id) {
            if let Some(reply) = self.chat.deliver_reply(&mut self.state, id) {
                return AppEvent::AssistantReplied(reply.clone());
            }
        } else if self.router.take_chart_init(id) {
            let report = self.charts.render(self.state.financial_data());
            info!(
                rendered = report.rendered.len(),
                skipped = report.skipped.len(),
                "charts initialized"
            );
            return AppEvent::ChartsRendered(report);
        }

        debug!(%id, "timer had no owner");
        AppEvent::Stale(id)
    }

    /// Waits for the next timer and handles it.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        let id = self.timers.recv().await?;
        Some(self.handle_timer(id))
    }

    /// Handles timers until nothing is scheduled. Stale firings are dropped.
    pub async fn run_pending(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while self.has_pending_tasks() {
            match self.next_event().await {
                Some(AppEvent::Stale(_)) => {}
                Some(event) => events.push(event),
                None => break,
            }
        }
        events
    }
}
