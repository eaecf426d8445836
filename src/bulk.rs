use std::io::Read;

use crate::{parse_answer, AnswerStore, Error, QUESTION_COUNT};

/// 回答用紙のCSVを1件ずつ読み込む
///
/// 先頭行はヘッダ。各行は `id, 設問1, ..., 設問20` で、回答は半角数字1〜5か選択肢の文言。
/// 各件には開始行番号 (1始まり、ヘッダを含む) を添える。
/// 不正な行があっても残りの行は読み続ける。
pub fn read_bulk<R: Read>(
    reader: R,
) -> impl Iterator<Item = (u64, Result<(String, AnswerStore), Error>)> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| match record {
            Ok(record) => {
                let line = record.position().map_or(0, |position| position.line());
                (line, to_answer_store(&record))
            }
            Err(e) => (e.position().map_or(0, |position| position.line()), Err(e.into())),
        })
}

fn to_answer_store(record: &csv::StringRecord) -> Result<(String, AnswerStore), Error> {
    let mut fields = record.iter();
    let id = fields.next().unwrap_or_default().to_string();
    let found = record.len().saturating_sub(1);
    if found != QUESTION_COUNT {
        tracing::debug!(id = %id, found, "answer sheet has wrong number of answers");
        return Err(Error::ColumnCount {
            expected: QUESTION_COUNT,
            found,
        });
    }
    let mut store = AnswerStore::default();
    for field in fields {
        let score = parse_answer(field).map_err(|e| {
            tracing::debug!(id = %id, field = %field, "illegal answer");
            e
        })?;
        store.push(score)?;
    }
    Ok((id, store))
}
