//! 候補に読みの注釈を付与するユーティリティ
//!
//! このバイナリは、標準入力から `表記<TAB>読みのヒント` の行を読み込んで候補を作り、
//! 注釈フィルター（と重複の統合フィルター）を通した結果を
//! 指定された出力形式（raw、detail）で出力します。
//! 空行は区間の区切りとして扱われます。

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use dictlookup::annotation::{Annotation, HINT_DELIMITER};
use dictlookup::candidate::{Candidate, Code, DictEntry, Phrase, Sentence};
use dictlookup::config::{Config, MapConfig};
use dictlookup::filter::{self, Filter, Segment, Ticket};
use dictlookup::translation::{FifoTranslation, Menu};
use dictlookup::{DictionaryComponent, DictionaryLookupFilter, LexiconDirectory};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Raw,
    Detail,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "raw" => Ok(Self::Raw),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "annotate", about = "Annotates candidates with pronunciations")]
struct Args {
    /// Directory containing `<name>.lookup.tsv` and `<name>.syllabary.txt`.
    #[clap(short = 'd', long)]
    dicdir: PathBuf,

    /// Name of the lookup dictionary. Overrides `<name_space>/dictionary` in the config.
    #[clap(short = 'n', long)]
    dictionary: Option<String>,

    /// Config file of `key: value` lines.
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// Name space of the filter.
    #[clap(long, default_value = "filter")]
    name_space: String,

    /// Tags of the input segments, separated by commas.
    #[clap(short = 'T', long, default_value = "abc")]
    tags: String,

    /// Output mode. Choices are raw and detail.
    #[clap(short = 'O', long, default_value = "raw")]
    output_mode: OutputMode,

    /// Merges candidates with the same text and annotation.
    #[clap(short = 'u', long)]
    uniquify: bool,
}

/// 入力の一行から候補を作成します。
///
/// 表記が空白を含む場合は単語ごとの文候補とし、ヒントも空白で区切って各単語のコメントにします。
fn parse_candidate(line: &str) -> Candidate {
    let (text, hint) = line.split_once('\t').unwrap_or((line, ""));
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > 1 {
        let hints: Vec<&str> = hint.split_whitespace().collect();
        let components = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let hint = hints.get(i).copied().unwrap_or_default();
                DictEntry::new(*word, Code::default()).with_comment(hint)
            })
            .collect();
        let end = words.iter().map(|w| w.len()).sum();
        Sentence::new(0, end, components).into()
    } else {
        let text = text.trim();
        let comment = if hint.is_empty() {
            String::new()
        } else {
            format!("{HINT_DELIMITER}{hint}")
        };
        let entry = DictEntry::new(text, Code::default()).with_comment(comment);
        Phrase::new("phrase", 0, text.len(), entry).into()
    }
}

fn escape(comment: &str) -> String {
    comment.replace('\r', "\\r").replace('\x0c', "\\f")
}

fn write_candidates<W>(
    out: &mut W,
    candidates: &[Candidate],
    mode: &OutputMode,
) -> std::io::Result<()>
where
    W: Write,
{
    match mode {
        OutputMode::Raw => {
            for cand in candidates {
                writeln!(out, "{}\t{}", cand.text(), escape(cand.comment()))?;
            }
        }
        OutputMode::Detail => {
            for cand in candidates {
                let merged = match cand {
                    Candidate::Uniquified(u) => u.items().len(),
                    _ => 1,
                };
                writeln!(
                    out,
                    "{}\tkind={}\tgenuine={}\tmerged={}",
                    cand.text(),
                    cand.kind(),
                    cand.genuine().kind(),
                    merged,
                )?;
                let annotation = Annotation::parse_with_text(cand.comment(), cand.text());
                let Some(annotation) = annotation else {
                    continue;
                };
                if let Some(prefix) = annotation.prefix() {
                    writeln!(out, "\tprefix={}", escape(prefix))?;
                }
                for record in annotation.records() {
                    writeln!(
                        out,
                        "\t{}\t{}\t{}{}",
                        u8::from(record.matched),
                        record.text,
                        record.line,
                        if record.is_composition() { "\t(composition)" } else { "" },
                    )?;
                }
            }
        }
    }
    out.write_all(b"EOS\n")
}

/// ログの出力先を標準エラー出力に設定します。
///
/// ライブラリが `log` で出力するレコードもここに流れます。
/// 既定のレベルは warn で、環境変数 `RUST_LOG` で変更できます。
fn init_logger() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| e as Box<dyn Error>)
}

/// メイン関数
///
/// 辞書を開き、標準入力から読み込んだ候補をフィルターに通して、
/// 指定された形式で結果を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    init_logger()?;
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::from_reader(File::open(path)?)?,
        None => MapConfig::new(),
    };
    let name_space = DictionaryLookupFilter::resolve_name_space(&args.name_space).to_string();
    let dictionary_key = format!("{name_space}/dictionary");
    if let Some(name) = &args.dictionary {
        config.set_string(dictionary_key.as_str(), name.as_str());
    }
    let Some(dictname) = config.get_string(&dictionary_key).map(ToString::to_string) else {
        return Err(format!("{dictionary_key} is not configured").into());
    };

    eprintln!("Loading the dictionary...");
    let component: Rc<dyn DictionaryComponent> = Rc::new(LexiconDirectory::new(&args.dicdir));
    component.create(&dictname)?;

    let ticket = Ticket::new(&args.name_space, Some(&config));
    let mut names = vec!["dictionary_lookup_filter"];
    if args.uniquify {
        names.push("phonology_uniquifier");
    }
    let mut filters: Vec<Box<dyn Filter>> = names
        .into_iter()
        .filter_map(|name| filter::create_filter(name, &ticket, &component))
        .collect();
    let tags: Vec<&str> = args
        .tags
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    eprintln!("Ready to annotate");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let mut upstream = FifoTranslation::new();
    let mut end = 0;
    let mut lines = std::io::stdin().lock().lines();
    loop {
        let line = lines.next().transpose()?;
        let segment_end = line.as_deref().is_none_or(|l| l.trim().is_empty());
        if let Some(line) = line.as_deref().filter(|l| !l.trim().is_empty()) {
            let cand = parse_candidate(line);
            end = end.max(cand.end());
            upstream.push(cand);
        }
        if segment_end && !upstream.is_empty() {
            let segment = Segment::new(0, end).with_tags(tags.iter().copied());
            let translation = std::mem::take(&mut upstream);
            let translation = filter::apply_filters(&mut filters, &segment, Box::new(translation));
            let mut menu = Menu::new(translation);
            menu.prepare_all();
            write_candidates(&mut out, menu.candidates(), &args.output_mode)?;
            if is_tty {
                out.flush()?;
            }
            end = 0;
        }
        if line.is_none() {
            break;
        }
    }

    Ok(())
}
