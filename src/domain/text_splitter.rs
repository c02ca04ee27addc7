//! 文本分句
//!
//! 将待合成文本按句末标点切分，每句独立送入 TTS 产生一个分段。
//! 支持中英文混排。

/// 句末分隔符（总是切分）
#[inline]
fn is_sentence_delimiter(ch: char) -> bool {
    matches!(ch, '。' | '？' | '！' | '.' | '?' | '!' | '…')
}

/// 跟随在句末标点后的收尾字符（引号、右括号等，归属前一句）
#[inline]
fn is_trailing_char(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | '\u{201D}' | '\u{2019}' | ')' | '）' | '」' | '』'
    )
}

/// 按句切分文本
///
/// 切分策略:
/// 1. 按行分割，空行忽略，句子不跨行合并
/// 2. 行内按句末标点切分，标点保留在句尾
/// 3. 紧随句末标点的引号/括号归属前一句
/// 4. 去除首尾空白，过滤空句
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut current = String::new();
        let mut just_ended = false;

        for ch in line.chars() {
            if just_ended && !is_trailing_char(ch) && !is_sentence_delimiter(ch) {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
                just_ended = false;
            }

            current.push(ch);
            if is_sentence_delimiter(ch) {
                just_ended = true;
            }
        }

        let trimmed = current.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }

    sentences
}
