use portal_core::model::PASSING_SCORE;
use portal_core::quiz::{QuizPhase, QuizSession};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Wrong,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Idle => "quiz-option",
            Self::Selected => "quiz-option selected",
            Self::Correct => "quiz-option correct",
            Self::Wrong => "quiz-option wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub correct_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub position_label: String,
    pub percent: u8,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub locked: bool,
    pub can_submit: bool,
    pub feedback: Option<FeedbackVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub prompt: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSummaryVm {
    pub score_label: String,
    pub tally_label: String,
    pub passed: bool,
    pub verdict: String,
    pub rows: Vec<ResultRowVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Empty,
    Question(QuestionVm),
    Complete(QuizSummaryVm),
}

impl QuizScreen {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        match session.phase() {
            QuizPhase::Empty => Self::Empty,
            QuizPhase::Answering { index } => question(session, index, None),
            QuizPhase::Revealing { index, was_correct } => question(session, index, Some(was_correct)),
            QuizPhase::Completed { .. } => session.outcome().map_or(Self::Empty, |outcome| {
                let passed = outcome.passed();
                let verdict = if passed {
                    "Passed! This lesson is complete.".to_string()
                } else {
                    format!("Not passed. You need {PASSING_SCORE}% to pass.")
                };
                let rows = session
                    .results()
                    .iter()
                    .zip(session.questions())
                    .map(|(result, question)| ResultRowVm {
                        prompt: question.prompt().to_string(),
                        correct: result.correct,
                    })
                    .collect();
                Self::Complete(QuizSummaryVm {
                    score_label: format!("{}%", outcome.score.value()),
                    tally_label: format!("{} of {} correct", outcome.correct, outcome.total),
                    passed,
                    verdict,
                    rows,
                })
            }),
        }
    }
}

fn question(session: &QuizSession, index: usize, revealed: Option<bool>) -> QuizScreen {
    let Some(current) = session.current_question() else {
        return QuizScreen::Empty;
    };
    let selected = session.selected();
    let options = current
        .options()
        .iter()
        .enumerate()
        .map(|(option, label)| {
            let state = match revealed {
                Some(_) if current.is_correct(option) => OptionState::Correct,
                Some(_) if selected == Some(option) => OptionState::Wrong,
                None if selected == Some(option) => OptionState::Selected,
                _ => OptionState::Idle,
            };
            OptionVm {
                index: option,
                label: label.clone(),
                state,
            }
        })
        .collect();
    let feedback = revealed.map(|correct| FeedbackVm {
        correct,
        correct_answer: current
            .options()
            .get(current.correct_index())
            .cloned()
            .unwrap_or_default(),
    });

    QuizScreen::Question(QuestionVm {
        position_label: format!("Question {} of {}", index + 1, session.total()),
        percent: session.progress_percent(),
        prompt: current.prompt().to_string(),
        options,
        locked: revealed.is_some(),
        can_submit: revealed.is_none() && selected.is_some(),
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{LessonId, QuestionId, QuizQuestion};
    use portal_core::quiz::reveal_delay;
    use portal_core::time::fixed_now;

    fn session() -> QuizSession {
        let questions = (1..=2)
            .map(|i| {
                QuizQuestion::new(
                    QuestionId::from_u128(i),
                    LessonId::from_u128(1),
                    format!("Q{i}"),
                    vec!["yes".into(), "no".into()],
                    0,
                )
                .unwrap()
            })
            .collect();
        QuizSession::new(questions)
    }

    #[test]
    fn empty_quiz_is_empty_screen() {
        assert_eq!(
            QuizScreen::from_session(&QuizSession::new(Vec::new())),
            QuizScreen::Empty
        );
    }

    #[test]
    fn selection_enables_submit() {
        let mut quiz = session();
        let QuizScreen::Question(vm) = QuizScreen::from_session(&quiz) else {
            panic!("expected question");
        };
        assert_eq!(vm.position_label, "Question 1 of 2");
        assert!(!vm.can_submit);

        quiz.select_option(1).unwrap();
        let QuizScreen::Question(vm) = QuizScreen::from_session(&quiz) else {
            panic!("expected question");
        };
        assert!(vm.can_submit);
        assert_eq!(vm.options[1].state, OptionState::Selected);
    }

    #[test]
    fn wrong_answer_reveals_the_right_one() {
        let mut quiz = session();
        quiz.select_option(1).unwrap();
        quiz.submit(fixed_now()).unwrap();

        let QuizScreen::Question(vm) = QuizScreen::from_session(&quiz) else {
            panic!("expected question");
        };
        assert!(vm.locked);
        assert_eq!(vm.options[0].state, OptionState::Correct);
        assert_eq!(vm.options[1].state, OptionState::Wrong);
        let feedback = vm.feedback.unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, "yes");
    }

    #[test]
    fn completion_lists_each_question() {
        let mut quiz = session();
        let mut now = fixed_now();
        for option in [0, 1] {
            quiz.select_option(option).unwrap();
            quiz.submit(now).unwrap();
            now += reveal_delay();
            quiz.tick(now);
        }

        let QuizScreen::Complete(summary) = QuizScreen::from_session(&quiz) else {
            panic!("expected summary");
        };
        assert_eq!(summary.score_label, "50%");
        assert_eq!(summary.tally_label, "1 of 2 correct");
        assert!(!summary.passed);
        assert_eq!(summary.verdict, "Not passed. You need 70% to pass.");
        assert_eq!(
            summary.rows.iter().map(|row| row.correct).collect::<Vec<_>>(),
            vec![true, false]
        );
    }
}
