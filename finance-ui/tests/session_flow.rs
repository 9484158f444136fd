use std::time::Duration;

use finance_core::chat::responder::DEFAULT_RULES;
use finance_core::research::parse_tags;
use finance_core::{
    ChartKind, FinancialModelError, NewResearchTopic, Page, Ratio, Role, TopicId, UserType,
};
use finance_ui::app::{AppEvent, FinanceApp};
use finance_ui::charts::TerminalSink;
use finance_ui::commands::{self, Command, ResearchCommand};
use finance_ui::config::Settings;
use finance_ui::router::Navigation;
use finance_ui::AppError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn app() -> FinanceApp<TerminalSink<Vec<u8>>> {
    FinanceApp::new(&Settings::default(), TerminalSink::new(Vec::new()))
}

#[tokio::test(start_paused = true)]
async fn budget_question_is_answered_after_one_second() {
    let mut app = app();
    let start = tokio::time::Instant::now();

    app.send_message("What's a good budget rule?");
    assert_eq!(app.state().messages().len(), 1);

    let event = app.next_event().await.unwrap();

    assert_eq!(start.elapsed(), Duration::from_secs(1));
    let AppEvent::AssistantReplied(reply) = event else {
        panic!("expected a reply, got {event:?}");
    };
    assert_eq!(reply.role(), Role::Assistant);
    assert_eq!(
        reply.content(),
        DEFAULT_RULES[0].template.replace("{user_type}", UserType::Student.as_str())
    );
    assert_eq!(app.state().messages().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_reply_and_starts_fresh_log() {
    let mut app = app();
    app.send_message("How do I pay off debt?");

    assert_eq!(app.clear_chat(), 1);
    assert!(app.state().welcome_visible());

    app.send_message("tax tips");
    assert_eq!(app.state().messages().len(), 1);
    assert_eq!(app.state().messages()[0].content(), "tax tips");

    let events = app.run_pending().await;

    assert_eq!(events.len(), 1);
    assert_eq!(app.state().messages().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn analytics_charts_render_after_layout_delay() {
    let mut app = app();
    let start = tokio::time::Instant::now();

    let nav = app.navigate_to("analytics").unwrap();
    assert!(matches!(
        nav,
        Navigation::Switched {
            to: Page::Analytics,
            chart_init: Some(_),
            ..
        }
    ));
    assert_eq!(app.charts().live_count(), 0);

    let event = app.next_event().await.unwrap();

    assert_eq!(start.elapsed(), Duration::from_millis(100));
    let AppEvent::ChartsRendered(report) = event else {
        panic!("expected charts, got {event:?}");
    };
    assert_eq!(report.rendered, ChartKind::ALL.to_vec());
    assert_eq!(app.charts().live_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn leaving_analytics_before_layout_settles_skips_charts() {
    let mut app = app();

    app.navigate(Page::Analytics);
    app.navigate(Page::Chat);

    assert!(!app.has_pending_tasks());
    assert!(app.run_pending().await.is_empty());
    assert_eq!(app.charts().live_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn submitted_form_derives_metrics() {
    let mut app = app();
    for (name, value) in [
        ("income", "5000"),
        ("housing", "1200"),
        ("food", "600"),
        ("transportation", "400"),
        ("entertainment", "300"),
        ("healthcare", "200"),
        ("other", "200"),
        ("debt", "500"),
    ] {
        app.set_form_field(name, value).unwrap();
    }

    assert_eq!(app.submit_form(), Ok(None));

    let model = app.financial_data();
    assert_eq!(model.expenses(), dec!(2900));
    assert_eq!(model.savings_rate(), Ratio::Percent(dec!(42.0)));
    assert_eq!(model.debt_ratio(), Ratio::Percent(dec!(10.0)));
}

#[tokio::test(start_paused = true)]
async fn zero_income_reports_undefined_ratios() {
    let mut app = app();
    app.set_form_field("income", "0").unwrap();

    app.submit_form().unwrap();

    assert_eq!(app.financial_data().savings_rate(), Ratio::Undefined);
    assert_eq!(app.financial_data().debt_ratio(), Ratio::Undefined);
}

#[tokio::test(start_paused = true)]
async fn invalid_submission_leaves_model_unchanged() {
    let mut app = app();
    let before = app.financial_data().clone();
    app.set_form_field("income", "6000").unwrap();
    app.set_form_field("housing", "abc").unwrap();
    app.set_form_field("debt", "-5").unwrap();

    let result = app.submit_form();
    let Err(AppError::InvalidFinancialData(FinancialModelError::InvalidInput(errors))) = result
    else {
        panic!("submission should be rejected");
    };

    let fields: Vec<_> = errors.iter().map(|e| e.field.name()).collect();
    assert_eq!(fields, vec!["housing", "debt"]);
    assert_eq!(app.financial_data(), &before);
}

#[tokio::test(start_paused = true)]
async fn research_hub_saves_searches_and_filters_topics() {
    let mut app = app();
    app.navigate_to("research").unwrap();
    assert_eq!(app.state().current_page(), Page::Research);
    assert!(!app.has_pending_tasks());

    let Some(Command::Research(ResearchCommand::Add { title, content, tags })) =
        commands::parse("/research add Tax brackets | Marginal rates explained | Tax, Budget")
            .unwrap()
    else {
        panic!("expected a research add command");
    };
    app.add_research_topic(NewResearchTopic::new(title, content, tags)).unwrap();
    app.add_research_topic(NewResearchTopic::new(
        "Index funds",
        "Low-cost diversification.",
        parse_tags("investment"),
    ))
    .unwrap();

    assert_eq!(app.research().len(), 2);
    let newest: Vec<_> = app.research().newest_first().map(|t| t.id).collect();
    assert_eq!(newest, vec![TopicId(2), TopicId(1)]);

    let found: Vec<_> = app.research().search("MARGINAL").iter().map(|t| t.id).collect();
    assert_eq!(found, vec![TopicId(1)]);
    let tagged: Vec<_> = app.research().with_tag("Investment").iter().map(|t| t.id).collect();
    assert_eq!(tagged, vec![TopicId(2)]);

    app.delete_research_topic(TopicId(1)).unwrap();
    assert_eq!(app.add_sample_topics(), 0);
    assert_eq!(app.research().len(), 1);
}
