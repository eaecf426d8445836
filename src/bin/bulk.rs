use clap::Parser;
use panas_check::{read_bulk, report::Summary, Affect, Error};
use std::fs::File;
use std::io::BufReader;
use tracing_subscriber::EnvFilter;

/// 回答用紙CSVをまとめて採点する
#[derive(Parser)]
struct Args {
    path: String,
    /// 1行1件のJSONで出力する
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let reader = BufReader::new(File::open(&args.path)?);
    for (line, row) in read_bulk(reader) {
        match row {
            Ok((id, store)) => {
                let score = store.to_score();
                if args.json {
                    let mut value = serde_json::to_value(Summary::from(&score))?;
                    value["id"] = serde_json::Value::String(id);
                    println!("{}", value);
                } else {
                    println!(
                        "id = {}, scores = {:?}, ratio = {:.1}, flourishing = {}",
                        id,
                        score.scores(),
                        score.ratio(),
                        score.is_flourishing()
                    );
                }
            }
            Err(e) => {
                tracing::warn!(line, error = %e, "skipped answer sheet");
            }
        }
    }
    Ok(())
}
