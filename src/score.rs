use serde::Serialize;

use crate::{Error, QUESTION_COUNT};

/// 設問を正負どちらの感情尺度に割り当てるかの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemClassification {
    /// ポジティブ感情の設問 (0始まり)
    pub positive: [usize; 10],
    /// ネガティブ感情の設問 (0始まり)
    pub negative: [usize; 10],
}

/// PANAS 20設問の標準分類
///
/// ポジティブ: 1, 4, 8, 11, 12, 13, 14, 15, 16, 19
/// ネガティブ: 2, 3, 5, 6, 7, 9, 10, 17, 18, 20
pub const PANAS: ItemClassification = ItemClassification {
    positive: [0, 3, 7, 10, 11, 12, 13, 14, 15, 18],
    negative: [1, 2, 4, 5, 6, 8, 9, 16, 17, 19],
};

impl ItemClassification {
    /// 両集合が重複なく全設問をちょうど1回ずつ覆っているか
    pub fn is_partition(&self) -> bool {
        let mut seen = [false; QUESTION_COUNT];
        for &index in self.positive.iter().chain(self.negative.iter()) {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        seen.iter().all(|&covered| covered)
    }
}

/// 1回分の回答。設問順に並んだ1〜5の値。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Responses([u8; QUESTION_COUNT]);

impl Responses {
    pub(crate) fn new_unchecked(values: [u8; QUESTION_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[u8; QUESTION_COUNT] {
        &self.0
    }

    fn sum_of(&self, indices: &[usize]) -> u8 {
        indices.iter().filter_map(|&index| self.0.get(index)).sum()
    }
}

impl TryFrom<[u8; QUESTION_COUNT]> for Responses {
    type Error = Error;

    fn try_from(values: [u8; QUESTION_COUNT]) -> Result<Self, Self::Error> {
        if values.iter().all(|value| (1..=5).contains(value)) {
            Ok(Self(values))
        } else {
            Err(Error::IllegalAnswer)
        }
    }
}

impl TryFrom<Vec<u8>> for Responses {
    type Error = Error;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        let found = values.len();
        let values: [u8; QUESTION_COUNT] =
            values.try_into().map_err(|_| Error::ColumnCount {
                expected: QUESTION_COUNT,
                found,
            })?;
        values.try_into()
    }
}

pub trait Affect {
    /// (ポジティブ感情, ネガティブ感情)
    fn scores(&self) -> (u8, u8);
    fn ratio(&self) -> f64;

    /// ポジティビティ比率が1以上ならウェル・ビーイングにつながる
    fn is_flourishing(&self) -> bool {
        self.ratio() >= 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub positive_score: u8,
    pub negative_score: u8,
    pub ratio: f64,
}

impl Affect for ScoreResult {
    fn scores(&self) -> (u8, u8) {
        (self.positive_score, self.negative_score)
    }

    fn ratio(&self) -> f64 {
        self.ratio
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreCalculator {
    classification: ItemClassification,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(PANAS)
    }
}

impl ScoreCalculator {
    pub fn new(classification: ItemClassification) -> Self {
        Self { classification }
    }

    pub fn classification(&self) -> &ItemClassification {
        &self.classification
    }

    /// 合計点数とポジティビティ比率を算出する
    pub fn compute(&self, responses: &Responses) -> ScoreResult {
        compute(responses, &self.classification)
    }
}

/// 正負それぞれの設問の回答を合計し、比率を小数第1位で丸める。
/// 丸めは偶数丸め。ネガティブ感情が0点のときの比率は0とする。
///
/// `classification` は全設問を重複なく覆っていること。範囲外の番号は集計されない。
pub fn compute(responses: &Responses, classification: &ItemClassification) -> ScoreResult {
    debug_assert!(
        classification.is_partition(),
        "item classification must cover every question exactly once"
    );
    let positive_score = responses.sum_of(&classification.positive);
    let negative_score = responses.sum_of(&classification.negative);
    let ratio = positivity_ratio(positive_score, negative_score);
    tracing::debug!(positive_score, negative_score, ratio, "computed affect scores");
    ScoreResult {
        positive_score,
        negative_score,
        ratio,
    }
}

fn positivity_ratio(positive: u8, negative: u8) -> f64 {
    if negative == 0 {
        return 0.0;
    }
    let tenths = f64::from(positive) * 10.0 / f64::from(negative);
    tenths.round_ties_even() / 10.0
}

#[cfg(test)]
mod test {
    use super::*;

    fn responses_with(positive: u8, negative: u8) -> Responses {
        let mut values = [0; QUESTION_COUNT];
        for &index in &PANAS.positive {
            values[index] = positive;
        }
        for &index in &PANAS.negative {
            values[index] = negative;
        }
        Responses::try_from(values).unwrap()
    }

    #[test]
    fn test_classification_is_partition() {
        assert!(PANAS.is_partition());

        let overlapping = ItemClassification {
            positive: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            negative: [9, 10, 11, 12, 13, 14, 15, 16, 17, 18],
        };
        assert!(!overlapping.is_partition());

        let out_of_range = ItemClassification {
            positive: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            negative: [10, 11, 12, 13, 14, 15, 16, 17, 18, 20],
        };
        assert!(!out_of_range.is_partition());
    }

    #[test]
    fn test_compute_low() {
        let score = ScoreCalculator::default().compute(&responses_with(1, 1));
        assert_eq!(score.scores(), (10, 10));
        assert_eq!(score.ratio, 1.0);
    }

    #[test]
    fn test_compute_high() {
        let score = ScoreCalculator::default().compute(&responses_with(5, 5));
        assert_eq!(score.scores(), (50, 50));
        assert_eq!(score.ratio, 1.0);
    }

    #[test]
    fn test_compute_positive_only() {
        let score = ScoreCalculator::default().compute(&responses_with(5, 1));
        assert_eq!(score.scores(), (50, 10));
        assert_eq!(score.ratio, 5.0);
    }

    #[test]
    fn test_compute_negative_only() {
        let score = ScoreCalculator::default().compute(&responses_with(1, 5));
        assert_eq!(score.scores(), (10, 50));
        assert_eq!(score.ratio, 0.2);
    }

    #[test]
    fn test_compute_bounds() {
        let calculator = ScoreCalculator::default();
        for seed in 0..500usize {
            let mut values = [0; QUESTION_COUNT];
            for (index, value) in values.iter_mut().enumerate() {
                *value = ((seed * 7 + index * 13 + seed / 5 * index) % 5) as u8 + 1;
            }
            let score = calculator.compute(&Responses::try_from(values).unwrap());
            assert!((10..=50).contains(&score.positive_score));
            assert!((10..=50).contains(&score.negative_score));
            assert!(score.ratio >= 0.2 && score.ratio <= 5.0);
        }
    }

    #[test]
    fn test_compute_idempotent() {
        let calculator = ScoreCalculator::default();
        let responses =
            Responses::try_from([3, 1, 2, 5, 1, 4, 2, 5, 1, 1, 4, 3, 5, 4, 3, 2, 1, 2, 4, 3])
                .unwrap();
        assert_eq!(calculator.compute(&responses), calculator.compute(&responses));
    }

    #[test]
    fn test_positivity_ratio() {
        assert_eq!(positivity_ratio(10, 10), 1.0);
        assert_eq!(positivity_ratio(20, 30), 0.7);
        assert_eq!(positivity_ratio(31, 10), 3.1);
        // 11 / 20 = 0.55, 13 / 20 = 0.65
        assert_eq!(positivity_ratio(11, 20), 0.6);
        assert_eq!(positivity_ratio(13, 20), 0.6);
        assert_eq!(positivity_ratio(10, 0), 0.0);
    }

    /// ポジティブ側の先頭 `lowered` 問だけ1点、他はすべて2点
    fn responses_lowered(lowered: usize) -> Responses {
        let mut values = [2; QUESTION_COUNT];
        for &index in PANAS.positive.iter().take(lowered) {
            values[index] = 1;
        }
        Responses::try_from(values).unwrap()
    }

    #[test]
    fn test_is_flourishing() {
        let calculator = ScoreCalculator::default();

        let score = calculator.compute(&responses_lowered(0));
        assert_eq!(score.scores(), (20, 20));
        assert_eq!(score.ratio, 1.0);
        assert!(score.is_flourishing());

        // 19 / 20 = 0.95 は 1.0 に丸まる
        let score = calculator.compute(&responses_lowered(1));
        assert_eq!(score.scores(), (19, 20));
        assert_eq!(score.ratio, 1.0);
        assert!(score.is_flourishing());

        let score = calculator.compute(&responses_lowered(2));
        assert_eq!(score.scores(), (18, 20));
        assert_eq!(score.ratio, 0.9);
        assert!(!score.is_flourishing());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "item classification must cover every question exactly once")]
    fn test_compute_rejects_broken_classification() {
        let broken = ItemClassification {
            positive: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            negative: [10, 11, 12, 13, 14, 15, 16, 17, 18, 20],
        };
        compute(&responses_with(1, 1), &broken);
    }

    #[test]
    fn test_responses_try_from() {
        assert!(Responses::try_from(vec![1; 20]).is_ok());
        assert!(Responses::try_from(vec![6; 20]).is_err());
        assert!(Responses::try_from(vec![0; 20]).is_err());
        assert!(matches!(
            Responses::try_from(vec![1; 19]),
            Err(Error::ColumnCount {
                expected: 20,
                found: 19
            })
        ));
    }
}
