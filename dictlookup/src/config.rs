//! フィルターの設定
//!
//! ホストの設定ローダーは [`Config`] トレイトを通して値を提供します。
//! このモジュールは参照実装として、`key: value` 形式の行から読み込む [`MapConfig`] を提供します。
//!
//! ```text
//! # comment
//! dictionary_lookup_filter/dictionary: jyut6ping3
//! dictionary_lookup_filter/tags: [abc, jyutping]
//! ```

use std::io::{BufRead, BufReader, Read};

use hashbrown::HashMap;

use crate::errors::{LookupError, Result};

/// 設定値の読み取り口
pub trait Config {
    /// 文字列の設定値を取得します。
    fn get_string(&self, key: &str) -> Option<&str>;

    /// 文字列リストの設定値を取得します。
    fn get_list(&self, key: &str) -> Option<&[String]>;
}

/// 設定値
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    Scalar(String),
    List(Vec<String>),
}

/// キーと値の対応表による設定
#[derive(Clone, Debug, Default)]
pub struct MapConfig {
    items: HashMap<String, ConfigValue>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列の設定値を登録します。
    pub fn set_string<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.items
            .insert(key.into(), ConfigValue::Scalar(value.into()));
    }

    /// 文字列リストの設定値を登録します。
    pub fn set_list<K, I, V>(&mut self, key: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.items.insert(
            key.into(),
            ConfigValue::List(values.into_iter().map(Into::into).collect()),
        );
    }

    /// `key: value` 形式の設定を読み込みます。
    ///
    /// - 空行と `#` で始まる行は無視されます。
    /// - `[a, b]` の形の値はリストとして扱われます。
    /// - 値を囲む `"` は取り除かれます。
    ///
    /// # エラー
    ///
    /// `:` を含まない行、またはキーが空の行がある場合、[`LookupError`] が返されます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut config = Self::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                return Err(LookupError::invalid_format(
                    "config",
                    format!("A config line must be `key: value`, {line:?}"),
                ));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(LookupError::invalid_format(
                    "config",
                    format!("Empty key, {line:?}"),
                ));
            }
            let value = value.trim();
            if let Some(items) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
                config.set_list(
                    key,
                    items
                        .split(',')
                        .map(|item| unquote(item.trim()))
                        .filter(|item| !item.is_empty()),
                );
            } else {
                config.set_string(key, unquote(value));
            }
        }

        Ok(config)
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

impl Config for MapConfig {
    fn get_string(&self, key: &str) -> Option<&str> {
        match self.items.get(key)? {
            ConfigValue::Scalar(value) => Some(value),
            ConfigValue::List(_) => None,
        }
    }

    fn get_list(&self, key: &str) -> Option<&[String]> {
        match self.items.get(key)? {
            ConfigValue::List(values) => Some(values),
            ConfigValue::Scalar(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader() {
        let data = "\
# lookup settings
dictionary_lookup_filter/dictionary: jyut6ping3
dictionary_lookup_filter/tags: [abc, \"jyutping\", ]
empty:
";
        let config = MapConfig::from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            config.get_string("dictionary_lookup_filter/dictionary"),
            Some("jyut6ping3")
        );
        assert_eq!(
            config.get_list("dictionary_lookup_filter/tags"),
            Some(&["abc".to_string(), "jyutping".to_string()][..])
        );
        assert_eq!(config.get_string("empty"), Some(""));
        assert_eq!(config.get_string("dictionary_lookup_filter/tags"), None);
        assert_eq!(config.get_list("missing"), None);
    }

    #[test]
    fn test_invalid_line() {
        assert!(MapConfig::from_reader("dictionary".as_bytes()).is_err());
        assert!(MapConfig::from_reader(": value".as_bytes()).is_err());
    }

    #[test]
    fn test_quoted_value() {
        let config = MapConfig::from_reader("ns/dictionary: \"a: b\"".as_bytes()).unwrap();
        assert_eq!(config.get_string("ns/dictionary"), Some("a: b"));
    }
}
