use std::time::Duration;

use course_core::model::{LessonId, LessonRef, ModuleId};
use course_core::routes::{GuardDecision, Route};
use course_core::time::fixed_clock;
use course_core::{AppConfig, ProgressPolicy};
use services::overview::{DashboardSummary, ModuleOverview};
use services::ui_state::{FontSize, Theme};
use services::{AppServices, Credentials, LearningCommand, UiCommand};
use storage::repository::Storage;

fn lesson(module: u64, lesson: u64) -> LessonRef {
    LessonRef::new(ModuleId::new(module), LessonId::new(lesson))
}

fn credentials() -> Credentials {
    Credentials {
        email: "grandma@example.com".into(),
        password: "secret".into(),
    }
}

#[tokio::test]
async fn anonymous_navigation_redirects_without_touching_stores() {
    let app = AppServices::in_memory(fixed_clock(), AppConfig::default())
        .await
        .unwrap();
    let session = app.session();

    let learning_before = app.learning().snapshot();
    let auth_before = session.store().snapshot();
    let ui_before = app.ui().snapshot();

    for path in ["/dashboard", "/modules/1", "/modules/1/lessons/5", "/ai-assistant"] {
        let route = Route::parse(path).unwrap();
        assert_eq!(session.guard(route), GuardDecision::Redirect(Route::Login));
    }
    assert_eq!(session.guard(Route::Home), GuardDecision::Allow);

    assert_eq!(app.learning().snapshot(), learning_before);
    assert_eq!(session.store().snapshot(), auth_before);
    assert_eq!(app.ui().snapshot(), ui_before);
}

#[tokio::test]
async fn catalog_lookup_reports_missing_module() {
    let app = AppServices::in_memory(fixed_clock(), AppConfig::default())
        .await
        .unwrap();
    assert!(app.catalog().module_by_id(ModuleId::new(999)).is_none());
    assert!(app.catalog().require_module(ModuleId::new(999)).is_err());
}

#[tokio::test]
async fn learner_completes_email_lessons() {
    let app = AppServices::in_memory(fixed_clock(), AppConfig::default())
        .await
        .unwrap();
    app.session().login(&credentials()).await.unwrap();
    assert_eq!(
        app.session().guard(Route::ModuleDetail(ModuleId::new(1))),
        GuardDecision::Allow
    );

    let learning = app.learning();
    learning.dispatch(LearningCommand::SetCurrentModule(Some(ModuleId::new(1))));
    learning.dispatch(LearningCommand::SetCurrentLesson(Some(lesson(1, 5))));
    learning.dispatch(LearningCommand::UpdateLessonProgress {
        lesson: lesson(1, 5),
        percent: 50,
    });
    learning.dispatch(LearningCommand::CompleteLesson(lesson(1, 5)));
    learning.dispatch(LearningCommand::CompleteLesson(lesson(1, 5)));
    learning.dispatch(LearningCommand::AddTimeSpent(15));

    let state = learning.snapshot();
    let overview = ModuleOverview::from_module(state.module(ModuleId::new(1)).unwrap());
    assert_eq!(overview.counts.completed, 5);
    assert_eq!(overview.card.target, Some(Route::Lesson(lesson(1, 6))));
    assert_eq!(overview.card.progress.value(), 63);

    let summary = DashboardSummary::from_state(&state);
    assert_eq!(summary.completed_lessons, 13);
    assert_eq!(summary.time_spent_minutes, 15);
    assert_eq!(summary.total_progress.value(), 27);
    assert_eq!(summary.resume, Some(Route::Lesson(lesson(1, 6))));

    // the shared catalog keeps its authored data
    let authored = app.catalog();
    let email = authored.module_by_id(ModuleId::new(1)).unwrap();
    assert!(!email.lesson(LessonId::new(5)).unwrap().is_completed());
    assert_eq!(email.progress().value(), 45);
}

#[tokio::test]
async fn snapshot_policy_is_taken_from_config() {
    let config = AppConfig::default().with_progress_policy(ProgressPolicy::Snapshot);
    let app = AppServices::in_memory(fixed_clock(), config).await.unwrap();

    app.learning()
        .dispatch(LearningCommand::CompleteLesson(lesson(2, 2)));
    let progress = app
        .learning()
        .select(|s| s.module(ModuleId::new(2)).map(|m| m.progress().value()));
    assert_eq!(progress, Some(20));
}

#[tokio::test]
async fn session_token_survives_restart_but_requires_login() {
    let db = "sqlite:file:memdb_learning_flow_restart?mode=memory&cache=shared";
    let storage = Storage::sqlite(db).await.unwrap();
    let first = AppServices::from_storage(storage.clone(), fixed_clock(), AppConfig::default())
        .await
        .unwrap();
    first.session().login(&credentials()).await.unwrap();

    let second = AppServices::from_storage(storage, fixed_clock(), AppConfig::default())
        .await
        .unwrap();
    let auth = second.session().store().snapshot();
    assert!(auth.token().is_some());
    assert!(!auth.is_authenticated());

    second.session().logout().await.unwrap();
    let third = AppServices::from_storage(Storage::sqlite(db).await.unwrap(), fixed_clock(), AppConfig::default())
        .await
        .unwrap();
    assert!(third.session().store().snapshot().token().is_none());
}

#[tokio::test(start_paused = true)]
async fn assistant_replies_with_configured_delay() {
    let config = AppConfig::default().with_reply_delay(Duration::from_millis(200));
    let app = AppServices::in_memory(fixed_clock(), config).await.unwrap();
    let assistant = app.assistant();

    let reply = assistant.send("Where is my inbox?").unwrap();
    tokio::time::sleep(Duration::from_millis(199)).await;
    assert!(assistant.store().select(|s| s.is_typing()));

    assert!(reply.join().await);
    assert_eq!(assistant.store().select(|s| s.chat_history().len()), 2);
}

#[tokio::test]
async fn ui_preferences_apply() {
    let app = AppServices::in_memory(fixed_clock(), AppConfig::default())
        .await
        .unwrap();
    let ui = app.ui();
    ui.dispatch(UiCommand::SetTheme(Theme::HighContrast));
    ui.dispatch(UiCommand::SetFontSize(FontSize::Large));

    let state = ui.snapshot();
    assert_eq!(state.theme(), Theme::HighContrast);
    assert_eq!(state.font_size(), FontSize::Large);
}
