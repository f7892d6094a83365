//! ユーティリティ関数と型変換トレイトを提供するモジュール
//!
//! - `FromU32`: u32からの型変換トレイト（音節IDから音節表のインデックスへの変換）
//! - 読み仮名ヒントの空白除去と文字数の計算

/// u32から他の型への変換を提供するトレイト
///
/// 標準ライブラリのFromトレイトとは異なり、
/// ポインタ幅が32ビット以上であるという仮定のもとで変換を行います。
pub trait FromU32 {
    /// u32値から実装型を生成する
    fn from_u32(src: u32) -> Self;
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl FromU32 for usize {
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // Since the pointer width is guaranteed to be 32 or 64,
        // the following process always succeeds.
        unsafe { Self::try_from(src).unwrap_unchecked() }
    }
}

/// 文字列からすべての空白文字を取り除きます。
///
/// # 例
///
/// ```
/// # use dictlookup::utils::strip_whitespace;
/// assert_eq!(strip_whitespace(" zoe6 ; co5 "), "zoe6;co5");
/// ```
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 文字列に含まれるUnicodeスカラー値の数を返します。
///
/// 要素のテキストと音節列を対応付ける際に、1文字につき1音節として数えます。
#[inline(always)]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace("ngo5 dei6\t"), "ngo5dei6");
        assert_eq!(strip_whitespace(""), "");
    }

    #[test]
    fn test_char_len_multibyte() {
        assert_eq!(char_len("我哋"), 2);
        assert_eq!("我哋".len(), 6);
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(usize::from_u32(42), 42);
    }
}
