use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::{Affect, Error, ScoreResult};

const POSITIVE_LABEL: &str = "ポジティブ感情";
const NEGATIVE_LABEL: &str = "ネガティブ感情";
const RATIO_LABEL: &str = "ポジティビティ比率";

/// 棒グラフの目盛り上限 (1設問最大5点 x 10設問)
pub const CHART_MAX: u8 = 50;

pub const ADVICE: &str = "ポジティビティ比率を１以上にすることがウェル・ビーイングにつながります。";
pub const CELEBRATION: &str = "🎈🎈🎈 ポジティビティ比率が１以上です！ 🎈🎈🎈";

fn positive(text: &str) -> ColoredString {
    // #FFA500
    text.truecolor(255, 165, 0)
}

fn negative(text: &str) -> ColoredString {
    // #4169E1
    text.truecolor(65, 105, 225)
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub positive_score: u8,
    pub negative_score: u8,
    pub ratio: f64,
    /// 合計点に占めるポジティブ感情の割合 (%)
    pub positive_share: f64,
    pub celebrate: bool,
}

impl From<&ScoreResult> for Summary {
    fn from(score: &ScoreResult) -> Self {
        Self {
            positive_score: score.positive_score,
            negative_score: score.negative_score,
            ratio: score.ratio,
            positive_share: shares(score).0,
            celebrate: score.is_flourishing(),
        }
    }
}

/// (ポジティブ, ネガティブ) の合計点に占める割合 (%)
pub fn shares(score: &ScoreResult) -> (f64, f64) {
    let (pos, neg) = score.scores();
    let total = f64::from(pos) + f64::from(neg);
    if total == 0.0 {
        return (0.0, 0.0);
    }
    (
        f64::from(pos) * 100.0 / total,
        f64::from(neg) * 100.0 / total,
    )
}

pub fn render_metrics(score: &ScoreResult) -> String {
    format!(
        "{}: {} 点\n{}: {} 点\n{}: {:.1}\n",
        POSITIVE_LABEL,
        score.positive_score,
        NEGATIVE_LABEL,
        score.negative_score,
        RATIO_LABEL,
        score.ratio
    )
}

fn bar(score: u8) -> String {
    let filled = usize::from(score.min(CHART_MAX));
    let empty = usize::from(CHART_MAX) - filled;
    format!("{}{}", "█".repeat(filled), "·".repeat(empty))
}

/// ネガティブ感情、ポジティブ感情の順に並べた棒グラフ (0〜50点)
pub fn render_bar_chart(score: &ScoreResult) -> String {
    format!(
        "{}と{}\n{} {} {:>2}\n{} {} {:>2}\n",
        POSITIVE_LABEL,
        NEGATIVE_LABEL,
        NEGATIVE_LABEL,
        negative(&bar(score.negative_score)),
        score.negative_score,
        POSITIVE_LABEL,
        positive(&bar(score.positive_score)),
        score.positive_score,
    )
}

/// ドーナツグラフの代わりに、割合を1本の帯で表す
pub fn render_ratio_gauge(score: &ScoreResult) -> String {
    let (pos_share, neg_share) = shares(score);
    let width = usize::from(CHART_MAX);
    let pos_cells = if pos_share + neg_share == 0.0 {
        0
    } else {
        ((pos_share / 100.0) * width as f64).round() as usize
    };
    let neg_cells = if neg_share == 0.0 { 0 } else { width - pos_cells };
    format!(
        "{} {:.1}\n{}{}\n{} {:.1}% / {} {:.1}%\n",
        RATIO_LABEL,
        score.ratio,
        positive(&"█".repeat(pos_cells)),
        negative(&"█".repeat(neg_cells)),
        POSITIVE_LABEL,
        pos_share,
        NEGATIVE_LABEL,
        neg_share,
    )
}

/// ポジティビティ比率が1以上のときだけ祝う
pub fn celebration(score: &ScoreResult) -> Option<&'static str> {
    score.is_flourishing().then_some(CELEBRATION)
}

pub fn render(score: &ScoreResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "測定結果".bold()));
    out.push_str(&render_metrics(score));
    out.push('\n');
    out.push_str(&format!("{}\n\n", ADVICE.cyan()));
    out.push_str(&render_bar_chart(score));
    out.push('\n');
    out.push_str(&render_ratio_gauge(score));
    if let Some(message) = celebration(score) {
        out.push('\n');
        out.push_str(&format!("{}\n", message.yellow().bold()));
    }
    out
}

pub fn print_human(score: &ScoreResult) {
    print!("{}", render(score));
}

pub fn print_json(score: &ScoreResult) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(&Summary::from(score))?);
    Ok(())
}
