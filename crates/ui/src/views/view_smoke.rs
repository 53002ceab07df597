use std::sync::Arc;

use portal_core::model::{
    Course, CourseId, Flashcard, Lesson, LessonId, ProgressPatch, QuestionId, QuizQuestion,
    QuizScore, Viewer,
};
use portal_core::time::fixed_now;
use portal_core::video::VideoSource;
use services::{AppServices, SignUpResult};
use storage::{
    CatalogRepository, InMemoryAuth, InMemoryRepository, Storage, StorageError,
};

use super::test_harness::{
    ViewKind, demo_services, setup_view_harness, setup_view_harness_with,
    setup_view_harness_with_storage,
};

async fn first_course(services: &AppServices) -> CourseId {
    let page = services.dashboard().load(Viewer::Anonymous).await.unwrap();
    page.overview.courses[0].course.id
}

async fn first_lesson(services: &AppServices) -> LessonId {
    let course = first_course(services).await;
    let page = services.courses().load(course, Viewer::Anonymous).await.unwrap();
    page.lessons.lessons()[0].id
}

async fn sign_up(services: &AppServices) -> Viewer {
    match services
        .auth()
        .sign_up("learner@example.com", "secret1", "Learner")
        .await
        .unwrap()
    {
        SignUpResult::SignedIn(viewer) => viewer,
        SignUpResult::ConfirmationPending { .. } => panic!("demo auth signs in directly"),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_demo_catalog() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Machine Learning Foundations"), "missing course in {html}");
    assert!(html.contains("3 lessons"), "missing lesson count in {html}");
    assert!(html.contains("~45 min"), "missing estimate in {html}");
    assert!(html.contains("Start course"), "missing cta in {html}");
    assert!(html.contains("Sign in to track"), "missing sign-in hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_shows_stats_when_signed_in() {
    let services = demo_services();
    sign_up(&services).await;

    let mut harness = setup_view_harness_with(ViewKind::Dashboard, services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Learner"), "missing greeting in {html}");
    assert!(html.contains("Lessons completed"), "missing stats in {html}");
    assert!(html.contains("0 / 5"), "missing totals in {html}");
}

struct FailingCatalog;

#[async_trait::async_trait]
impl CatalogRepository for FailingCatalog {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_course(&self, _id: CourseId) -> Result<Option<Course>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_lessons(&self, _course_id: CourseId) -> Result<Vec<Lesson>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_all_lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_lesson(&self, _id: LessonId) -> Result<Option<Lesson>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_flashcards(&self, _lesson_id: LessonId) -> Result<Vec<Flashcard>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_quiz_questions(
        &self,
        _lesson_id: LessonId,
    ) -> Result<Vec<QuizQuestion>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

fn failing_storage() -> Storage {
    let repo = InMemoryRepository::new();
    Storage {
        catalog: Arc::new(FailingCatalog),
        progress: Arc::new(repo.clone()),
        profiles: Arc::new(repo.clone()),
        auth: Arc::new(InMemoryAuth::new(repo)),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Dashboard, failing_storage());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_lists_lessons() {
    let services = demo_services();
    let course = first_course(&services).await;

    let mut harness = setup_view_harness_with(ViewKind::Course(course.to_string()), services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("What is machine learning?"), "missing lesson in {html}");
    assert!(html.contains("~15 min"), "missing duration in {html}");
    assert!(html.contains("Video + Quiz"), "missing kind in {html}");
    assert!(html.contains("All courses"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_unparseable_id_is_not_found() {
    let mut harness = setup_view_harness(ViewKind::Course("not-a-uuid".to_string()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course not found"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_unknown_id_is_not_found() {
    let unknown = CourseId::from_u128(0xABCD).to_string();
    let mut harness = setup_view_harness(ViewKind::Course(unknown));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course not found"), "missing not found in {html}");
    assert!(!html.contains("Retry"), "not found is not retryable: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_renders_tabs_and_video() {
    let services = demo_services();
    let lesson = first_lesson(&services).await;

    let mut harness = setup_view_harness_with(ViewKind::Lesson(lesson.to_string()), services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lesson 1"), "missing order badge in {html}");
    assert!(html.contains("Flashcards (3)"), "missing card count in {html}");
    assert!(html.contains("Quiz (2)"), "missing quiz count in {html}");
    assert!(html.contains("Load video"), "missing video button in {html}");
    assert!(html.contains("Open on YouTube"), "missing external link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_marks_completed_lesson() {
    let services = demo_services();
    let viewer = sign_up(&services).await;
    let lesson = first_lesson(&services).await;
    let patch = ProgressPatch::quiz_completed(QuizScore::from_percent(100), fixed_now());
    services.progress().record(viewer, lesson, &patch).await;

    let mut harness = setup_view_harness_with(ViewKind::Lesson(lesson.to_string()), services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("✓ Completed"), "missing completed badge in {html}");
    assert!(html.contains("Last studied"), "missing last studied in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_smoke_offers_review_for_completed_lesson() {
    let services = demo_services();
    let viewer = sign_up(&services).await;
    let course = first_course(&services).await;
    let lesson = first_lesson(&services).await;
    let patch = ProgressPatch::quiz_completed(QuizScore::from_percent(80), fixed_now());
    services.progress().record(viewer, lesson, &patch).await;

    let mut harness = setup_view_harness_with(ViewKind::Course(course.to_string()), services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Review"), "missing review cta in {html}");
    assert!(html.contains("1 of 3 lessons completed"), "missing progress in {html}");
}

fn questions(lesson: LessonId, n: u128) -> Vec<QuizQuestion> {
    (1..=n)
        .map(|i| {
            QuizQuestion::new(
                QuestionId::from_u128(i),
                lesson,
                format!("Question text {i}"),
                vec!["A".into(), "B".into()],
                0,
            )
            .unwrap()
        })
        .collect()
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_smoke_empty_quiz_renders_no_content() {
    let mut harness = setup_view_harness(ViewKind::Quiz(LessonId::from_u128(1), Vec::new()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No quiz questions"), "missing empty state in {html}");
    assert!(!html.contains("Something went wrong"), "empty is not an error: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_smoke_renders_first_question() {
    let lesson = LessonId::from_u128(1);
    let mut harness = setup_view_harness(ViewKind::Quiz(lesson, questions(lesson, 2)));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("Question text 1"), "missing prompt in {html}");
    assert!(html.contains("Check answer"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_smoke_renders_first_card() {
    let lesson = LessonId::from_u128(1);
    let cards = (1..=3)
        .map(|i| {
            Flashcard::new(
                portal_core::model::FlashcardId::from_u128(i),
                lesson,
                format!("Front {i}"),
                format!("Back {i}"),
            )
        })
        .collect();
    let mut harness = setup_view_harness(ViewKind::Flashcards(lesson, cards));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Card 1 of 3"), "missing position in {html}");
    assert!(html.contains("Front 1"), "missing front in {html}");
    assert!(html.contains("Click to reveal the answer"), "missing hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_smoke_empty_deck_renders_no_content() {
    let mut harness = setup_view_harness(ViewKind::Flashcards(LessonId::from_u128(1), Vec::new()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No flashcards"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn video_smoke_external_link_is_not_embedded() {
    let source = VideoSource::parse("https://vimeo.com/76979871");
    let mut harness = setup_view_harness(ViewKind::Video(source));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Open video externally"), "missing external button in {html}");
    assert!(!html.contains("<iframe"), "external video must not embed: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn video_smoke_invalid_link_shows_notice() {
    let source = VideoSource::parse("not a link");
    let mut harness = setup_view_harness(ViewKind::Video(source));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("not valid"), "missing invalid notice in {html}");
    assert!(html.contains("Open link externally"), "missing link button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn not_found_smoke_renders_message() {
    let mut harness = setup_view_harness(ViewKind::NotFound);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Page not found"), "missing title in {html}");
    assert!(html.contains("Back to courses"), "missing link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_smoke_renders_sign_in_form() {
    let mut harness = setup_view_harness(ViewKind::Auth);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing title in {html}");
    assert!(html.contains("No account yet? Sign up"), "missing switch in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_smoke_signed_in_viewer_sees_account() {
    let services = demo_services();
    sign_up(&services).await;
    let mut harness = setup_view_harness_with(ViewKind::Auth, services);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Signed in as learner@example.com"), "missing account in {html}");
}
