//! Bundled catalog for running without a hosted backend.

use portal_core::model::{
    Course, CourseId, Flashcard, FlashcardId, Lesson, LessonId, QuestionId, QuizQuestion,
};

use crate::repository::{InMemoryRepository, StorageError};

struct DemoLesson {
    title: &'static str,
    summary: &'static str,
    video: &'static str,
    cards: &'static [(&'static str, &'static str)],
    quiz: &'static [(&'static str, &'static [&'static str], usize)],
}

struct DemoCourse {
    title: &'static str,
    description: &'static str,
    lessons: &'static [DemoLesson],
}

const CATALOG: &[DemoCourse] = &[
    DemoCourse {
        title: "Machine Learning Foundations",
        description: "Supervised learning from linear regression to classification.",
        lessons: &[
            DemoLesson {
                title: "What is machine learning?",
                summary: "Supervised and unsupervised learning, and where each is used.",
                video: "https://www.youtube.com/watch?v=jGwO_UgTS7I",
                cards: &[
                    (
                        "Supervised learning",
                        "Learning a mapping from inputs to labelled outputs.",
                    ),
                    (
                        "Unsupervised learning",
                        "Finding structure in data without labels.",
                    ),
                    ("Training set", "The examples a model learns from."),
                ],
                quiz: &[
                    (
                        "Which task is supervised?",
                        &["Clustering news articles", "Predicting house prices", "Grouping customers"],
                        1,
                    ),
                    (
                        "Unsupervised learning works on...",
                        &["Labelled data", "Unlabelled data"],
                        1,
                    ),
                ],
            },
            DemoLesson {
                title: "Linear regression",
                summary: "Fitting a straight line with a cost function.",
                video: "https://youtu.be/4b4MUYve_U8",
                cards: &[
                    ("Cost function", "Measures how far predictions are from targets."),
                    ("Parameters", "The weights w and bias b the model learns."),
                ],
                quiz: &[
                    (
                        "Squared error cost is minimised by...",
                        &["Gradient descent", "Random guessing", "Sorting the data"],
                        0,
                    ),
                    (
                        "A linear model with one feature is...",
                        &["f(x) = wx + b", "f(x) = x^w", "f(x) = e^x"],
                        0,
                    ),
                    (
                        "A larger learning rate always converges faster.",
                        &["True", "False"],
                        1,
                    ),
                ],
            },
            DemoLesson {
                title: "Gradient descent",
                summary: "Walking downhill on the cost surface.",
                video: "https://www.youtube.com/watch?v=vsWrXfO3wWw",
                cards: &[(
                    "Learning rate",
                    "Step size alpha taken on each update.",
                )],
                quiz: &[],
            },
        ],
    },
    DemoCourse {
        title: "Neural Networks",
        description: "Layers, activations and how networks learn.",
        lessons: &[
            DemoLesson {
                title: "Neurons and layers",
                summary: "From a single neuron to a layer of many.",
                video: "https://youtu.be/aircAruvnKk",
                cards: &[
                    ("Activation", "The output value of a neuron."),
                    ("Hidden layer", "A layer between input and output."),
                ],
                quiz: &[(
                    "A layer computes...",
                    &["A sorted list", "Activations from the previous layer"],
                    1,
                )],
            },
            DemoLesson {
                title: "Activation functions",
                summary: "Sigmoid, ReLU and when to use them.",
                video: "https://example.com/videos/activations",
                cards: &[],
                quiz: &[(
                    "ReLU returns...",
                    &["max(0, z)", "1 / (1 + e^-z)", "z^2"],
                    0,
                )],
            },
        ],
    },
];

/// Loads the bundled catalog into `repo`.
///
/// # Errors
///
/// Returns `StorageError` if a row conflicts with existing data.
pub fn seed(repo: &InMemoryRepository) -> Result<(), StorageError> {
    let mut next_id: u128 = 0;
    let mut id = || {
        next_id += 1;
        0xDE40_0000_0000_0000_0000_0000_0000_0000 | next_id
    };

    for course in CATALOG {
        let course_id = CourseId::from_u128(id());
        repo.insert_course(Course::new(course_id, course.title).with_description(course.description))?;

        for (order, lesson) in (1..).zip(course.lessons) {
            let lesson_id = LessonId::from_u128(id());
            repo.insert_lesson(
                Lesson::new(lesson_id, course_id, order, lesson.title, lesson.video)
                    .with_summary(lesson.summary),
            )?;

            for (front, back) in lesson.cards {
                repo.insert_flashcard(Flashcard::new(
                    FlashcardId::from_u128(id()),
                    lesson_id,
                    *front,
                    *back,
                ))?;
            }

            for (prompt, options, correct) in lesson.quiz {
                let question = QuizQuestion::new(
                    QuestionId::from_u128(id()),
                    lesson_id,
                    *prompt,
                    options.iter().map(|o| (*o).to_string()).collect(),
                    *correct,
                )
                .map_err(|e| StorageError::InvalidRow {
                    table: "quizzes",
                    reason: e.to_string(),
                })?;
                repo.insert_question(question)?;
            }
        }
    }
    Ok(())
}
