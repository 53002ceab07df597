use portal_core::model::Viewer;
use portal_core::quiz::reveal_delay;
use portal_core::time::fixed_now;
use services::{AppServices, Clock, ProgressWrite, QuizAdvance, SignUpResult};

#[tokio::test]
async fn signed_in_learner_completes_a_lesson() {
    let app = AppServices::demo(Clock::fixed(fixed_now())).unwrap();

    let SignUpResult::SignedIn(viewer) = app
        .auth()
        .sign_up("learner@example.com", "secret1", "Learner")
        .await
        .unwrap()
    else {
        panic!("demo backend signs in directly");
    };

    let before = app.dashboard().load(viewer).await.unwrap();
    assert_eq!(before.overview.stats.completed_lessons, 0);
    assert_eq!(
        before.profile.as_ref().map(|p| p.display_name()),
        Some("Learner")
    );

    let course = before.overview.courses[0].course.id;
    let course_page = app.courses().load(course, viewer).await.unwrap();
    let first = course_page.lessons.lessons()[0].clone();

    let lesson = app.lessons().load(first.id, viewer).await.unwrap();
    assert!(!lesson.questions.is_empty());
    assert!(!lesson.flashcards.is_empty());

    // Flashcards: flip every card once.
    let mut cards = app.flashcards(first.id, lesson.flashcards.clone());
    let mut writes = Vec::new();
    for _ in 0..cards.session().len() {
        if let Some(write) = cards.flip() {
            writes.push(write);
        }
        cards.flip();
        cards.next();
    }
    assert_eq!(writes.len(), 1);
    for write in writes {
        assert_eq!(write.commit().await, ProgressWrite::Saved);
    }

    // Quiz: answer everything correctly.
    let mut quiz = app.quiz(first.id, lesson.questions.clone());
    let mut completed = None;
    for question in lesson.questions.iter() {
        quiz.select(question.correct_index()).unwrap();
        quiz.submit().unwrap();
        quiz.advance_clock(reveal_delay());
        if let Some(QuizAdvance::Completed { outcome, write }) = quiz.tick() {
            assert_eq!(write.commit().await, ProgressWrite::Saved);
            completed = Some(outcome);
        }
    }
    let outcome = completed.expect("quiz completes");
    assert_eq!(outcome.score.value(), 100);

    let after = app.dashboard().load(viewer).await.unwrap();
    assert_eq!(after.overview.stats.completed_lessons, 1);
    assert_eq!(after.overview.course(course).unwrap().completed_lessons, 1);

    let lesson = app.lessons().load(first.id, viewer).await.unwrap();
    let row = lesson.progress.expect("progress row");
    assert!(row.completed);
    assert_eq!(row.flashcards_reviewed, lesson.flashcards.len() as u32);
}

#[tokio::test]
async fn anonymous_learner_sees_catalog_but_saves_nothing() {
    let app = AppServices::demo(Clock::fixed(fixed_now())).unwrap();
    assert_eq!(app.auth().viewer(), Viewer::Anonymous);

    let page = app.dashboard().load(Viewer::Anonymous).await.unwrap();
    assert!(page.overview.stats.total_lessons > 0);

    let course = page.overview.courses[0].course.id;
    let first = app.courses().load(course, Viewer::Anonymous).await.unwrap();
    let lesson_id = first.lessons.lessons()[0].id;
    let lesson = app.lessons().load(lesson_id, Viewer::Anonymous).await.unwrap();

    let mut quiz = app.quiz(lesson_id, lesson.questions.clone());
    let mut skipped = false;
    for _ in lesson.questions.iter() {
        quiz.select(0).unwrap();
        quiz.submit().unwrap();
        quiz.advance_clock(reveal_delay());
        if let Some(QuizAdvance::Completed { write, .. }) = quiz.tick() {
            skipped = write.commit().await == ProgressWrite::SkippedAnonymous;
        }
    }
    assert!(skipped);
}
