use crate::db::Question;

/// Which questions a quiz draws from. Category id `0` stands for all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(String),
}

impl From<i64> for QuizScope {
    fn from(id: i64) -> Self {
        match id {
            0 => QuizScope::All,
            id => QuizScope::Category(id.to_string()),
        }
    }
}

impl QuizScope {
    pub fn label(&self) -> &str {
        match self {
            QuizScope::All => "all",
            QuizScope::Category(id) => id.as_str(),
        }
    }
}

/// First question, by ascending id, that has not been served yet. `None`
/// once every eligible question is in `previous`.
pub fn next_question<'a>(eligible: &'a [Question], previous: &[i64]) -> Option<&'a Question> {
    let mut eligible: Vec<&Question> = eligible.iter().collect();
    eligible.sort_by_key(|q| q.id);
    eligible.into_iter().find(|q| !previous.contains(&q.id))
}
