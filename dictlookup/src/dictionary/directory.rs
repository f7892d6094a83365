//! ディレクトリから名前で辞書を開くコンポーネント

use std::cell::RefCell;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use hashbrown::HashMap;

use crate::dictionary::{Dictionary, DictionaryComponent, Lexicon};
use crate::errors::{LookupError, Result};

/// 参照表ファイルの拡張子
pub const LOOKUP_TABLE_SUFFIX: &str = ".lookup.tsv";

/// 音節表ファイルの拡張子
pub const SYLLABARY_SUFFIX: &str = ".syllabary.txt";

/// ディレクトリ内の `<name>.lookup.tsv` と `<name>.syllabary.txt` から辞書を開くコンポーネント
///
/// 一度開いた辞書は名前ごとにキャッシュされ、同じ名前を要求するすべてのフィルターで共有されます。
/// 音節表ファイルは省略可能で、存在しない場合はローマ字コードを展開できない辞書になります。
pub struct LexiconDirectory {
    root: PathBuf,
    opened: RefCell<HashMap<String, Rc<Lexicon>>>,
}

impl LexiconDirectory {
    /// 新しいコンポーネントを作成します。
    ///
    /// # 引数
    ///
    /// * `root` - 辞書ファイルを置くディレクトリ
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            root: root.into(),
            opened: RefCell::new(HashMap::new()),
        }
    }

    /// 辞書ファイルを置くディレクトリを取得します。
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, name: &str) -> Result<Lexicon> {
        let lookup_path = self.root.join(format!("{name}{LOOKUP_TABLE_SUFFIX}"));
        if !lookup_path.is_file() {
            return Err(LookupError::DictionaryNotFound(name.to_string()));
        }
        let lookup_rdr = File::open(&lookup_path)?;

        let syllabary_path = self.root.join(format!("{name}{SYLLABARY_SUFFIX}"));
        let lexicon = if syllabary_path.is_file() {
            Lexicon::from_readers(lookup_rdr, File::open(&syllabary_path)?)?
        } else {
            log::debug!("No syllabary for {name:?} at {syllabary_path:?}");
            Lexicon::from_readers(lookup_rdr, std::io::empty())?
        };
        log::info!(
            "Loaded the lookup dictionary {:?}: {} keys, {} syllables",
            name,
            lexicon.num_keys(),
            lexicon.num_syllables(),
        );
        Ok(lexicon)
    }
}

impl DictionaryComponent for LexiconDirectory {
    fn create(&self, name: &str) -> Result<Rc<dyn Dictionary>> {
        if name.is_empty() {
            return Err(LookupError::invalid_argument(
                "name",
                "The dictionary name is empty.",
            ));
        }
        if name.contains(['/', '\\']) {
            return Err(LookupError::invalid_argument(
                "name",
                format!("The dictionary name {name:?} must not contain a path separator."),
            ));
        }
        if let Some(lexicon) = self.opened.borrow().get(name) {
            return Ok(lexicon.clone());
        }
        let lexicon = Rc::new(self.load(name)?);
        self.opened
            .borrow_mut()
            .insert(name.to_string(), lexicon.clone());
        Ok(lexicon)
    }
}
