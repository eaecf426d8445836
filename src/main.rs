use std::io::{stdin, stdout, BufRead, Write};

use clap::Parser;
use panas_check::{parse_answer, report, AnswerStore, Error, QUESTIONS, QUESTION_COUNT};
use tracing_subscriber::EnvFilter;

/// ポジティブ感情・ネガティブ感情測定尺度(PANAS)
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// 20設問の回答をカンマ区切りで指定する (例: 1,2,5,...)
    #[arg(long, value_delimiter = ',')]
    answers: Option<Vec<String>>,
    /// 結果をJSONで出力する
    #[arg(long)]
    json: bool,
    /// 色付けせずに出力する
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let store = match args.answers {
        Some(answers) => from_args(&answers)?,
        None => {
            let stdin = stdin();
            let mut input = stdin.lock();
            let store = ask_all(&mut input)?;
            confirm(&mut input)?;
            store
        }
    };

    let score = store.to_score();
    if args.json {
        report::print_json(&score)?;
    } else {
        report::print_human(&score);
    }
    Ok(())
}

fn from_args(answers: &[String]) -> Result<AnswerStore, Error> {
    if answers.len() != QUESTION_COUNT {
        return Err(Error::ColumnCount {
            expected: QUESTION_COUNT,
            found: answers.len(),
        });
    }
    let mut store = AnswerStore::default();
    for answer in answers {
        store.push(parse_answer(answer)?)?;
    }
    Ok(store)
}

fn ask_all(input: &mut impl BufRead) -> Result<AnswerStore, Error> {
    println!("{}", QUESTIONS.title);
    println!("{}", QUESTIONS.description);
    println!("{}", QUESTIONS.instruction);
    println!();

    let mut buffer = String::new();
    let mut store = AnswerStore::default();
    for question in QUESTIONS.questions() {
        println!("{}. {}", question.id, question.text);
        for option in QUESTIONS.options() {
            print!("  {} => {}", option.score, option.text);
        }
        loop {
            println!();
            read_line(input, &mut buffer)?;
            // 空入力は初期値「まったくなかった」
            let answer = match buffer.trim() {
                "" => Ok(1),
                value => parse_answer(value),
            };
            buffer.clear();
            match answer {
                Ok(score) => {
                    store.push(score)?;
                    break;
                }
                Err(_) => print!("回答は半角数字1〜5で入力してください。"),
            }
        }
        println!();
    }
    Ok(store)
}

fn confirm(input: &mut impl BufRead) -> Result<(), Error> {
    print!("Enterキーを押すと結果を表示します。");
    stdout().flush()?;
    let mut buffer = String::new();
    read_line(input, &mut buffer)?;
    println!();
    Ok(())
}

fn read_line(input: &mut impl BufRead, buffer: &mut String) -> Result<(), Error> {
    stdout().flush()?;
    if input.read_line(buffer)? == 0 {
        return Err(Error::InputClosed);
    }
    Ok(())
}
