use once_cell::sync::Lazy;
use serde::Deserialize;

mod bulk;
pub mod report;
mod score;

pub use bulk::read_bulk;
pub use score::{
    compute, Affect, ItemClassification, Responses, ScoreCalculator, ScoreResult, PANAS,
};

/// 設問数
pub const QUESTION_COUNT: usize = 20;

pub static QUESTIONS: Lazy<Panas> = Lazy::new(|| {
    serde_json::from_str(include_str!("../resources/panas.json"))
        .unwrap_or_else(|e| panic!("resources/panas.json is malformed: {e}"))
});

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerOption {
    pub score: u8,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
}

/// PANAS 20設問のマスタ表現
#[derive(Debug, Deserialize)]
pub struct Panas {
    pub title: String,
    pub description: String,
    /// 教示文
    pub instruction: String,
    questions: Vec<Question>,
    options: Vec<AnswerOption>,
}

impl Panas {
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// 設問番号を指定して設問を取得する
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// 20設問を全て取得する
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 選択肢。点数の昇順。
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn score_of(&self, label: &str) -> Option<u8> {
        self.options
            .iter()
            .find(|option| option.text == label)
            .map(|option| option.score)
    }
}

/// 回答を点数に変換する
/// 半角数字1〜5、または選択肢の文言そのものを受け付ける。
pub fn parse_answer(value: &str) -> Result<u8, Error> {
    let value = value.trim();
    let score = match value.parse::<u8>() {
        Ok(score) => score,
        Err(_) => QUESTIONS.score_of(value).ok_or(Error::IllegalAnswer)?,
    };
    if (1..=5).contains(&score) {
        Ok(score)
    } else {
        Err(Error::IllegalAnswer)
    }
}

/// 入力途中の回答用紙
///
/// 未回答の設問は「まったくなかった」(1点) として扱う。
#[derive(Debug, Clone)]
pub struct AnswerStore {
    values: [u8; QUESTION_COUNT],
    offset: usize,
}

impl Default for AnswerStore {
    fn default() -> Self {
        Self {
            values: [1; QUESTION_COUNT],
            offset: 0,
        }
    }
}

impl AnswerStore {
    /// 回答を格納する
    /// 1〜5の回答番号以外は認めない。
    pub fn push(&mut self, score: u8) -> Result<(), Error> {
        if !(1..=5).contains(&score) {
            return Err(Error::IllegalAnswer);
        }
        let slot = self
            .values
            .get_mut(self.offset)
            .ok_or(Error::IllegalQuestion)?;
        *slot = score;
        self.offset += 1;
        Ok(())
    }

    /// 設問番号を指定して回答を格納する
    pub fn insert(&mut self, question_no: u8, score: u8) -> Result<(), Error> {
        if question_no < 1 {
            return Err(Error::IllegalQuestion);
        }
        if !(1..=5).contains(&score) {
            return Err(Error::IllegalAnswer);
        }
        let offset: usize = (question_no - 1).into();
        let slot = self.values.get_mut(offset).ok_or(Error::IllegalQuestion)?;
        *slot = score;
        Ok(())
    }

    /// 回答済みの設問数 (`push` による)
    pub fn answered(&self) -> usize {
        self.offset
    }

    pub fn responses(&self) -> Responses {
        Responses::new_unchecked(self.values)
    }

    pub fn to_score(&self) -> ScoreResult {
        ScoreCalculator::default().compute(&self.responses())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 20設問ではない
    #[error("question number must be between 1 and 20")]
    IllegalQuestion,
    /// 回答選択肢が違反
    #[error("answer must be one of 1-5 or an option label")]
    IllegalAnswer,
    #[error("expected {expected} answers, found {found}")]
    ColumnCount { expected: usize, found: usize },
    /// 回答途中で入力が終了した
    #[error("input closed before the survey was completed")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
