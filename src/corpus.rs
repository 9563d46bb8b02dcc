use crate::library::matching::is_hangul_syllable;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub const SAMPLE_TEXTS: [&str; 5] = [
    "안녕하세요. 한국어 폰트 비교입니다.",
    "이 코드는 한글 폰트의 유사성을 분석합니다.",
    "다양한 폰트를 비교하여 원하는 폰트를 찾으세요.",
    "한글 디자인은 매우 아름답습니다.",
    "가나다라마바사아자차카타파하",
];

/// Reads the corpus, falling back to [`SAMPLE_TEXTS`] when the file is
/// missing, not UTF-8, or empty.
pub async fn load_corpus(path: &Path) -> String {
    match fs::read_to_string(path).await {
        Ok(text) if !text.is_empty() => {
            info!("loaded corpus {} ({} bytes)", path.display(), text.len());
            return text;
        }
        Ok(_) => warn!("corpus {} is empty", path.display()),
        Err(e) => warn!("could not load corpus {}: {}", path.display(), e),
    }
    warn!("using default sample texts");
    SAMPLE_TEXTS.concat()
}

/// The `n` most frequent Hangul syllables of `text`, most frequent first.
/// Equal counts keep first-occurrence order.
pub fn sample_characters(text: &str, n: usize) -> Vec<char> {
    let mut counts: HashMap<char, (usize, usize)> = HashMap::new();
    for (position, ch) in text.chars().filter(|ch| is_hangul_syllable(*ch)).enumerate() {
        counts.entry(ch).or_insert((0, position)).0 += 1;
    }
    let mut ranked = counts.into_iter().collect::<Vec<_>>();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    ranked.into_iter().take(n).map(|(ch, _)| ch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_frequent_first() {
        let chars = sample_characters("나가나다나가", 10);
        assert_eq!(chars, vec!['나', '가', '다']);
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let chars = sample_characters("다가나나가다라", 10);
        assert_eq!(chars, vec!['다', '가', '나', '라']);
    }

    #[test]
    fn keeps_only_hangul_syllables() {
        let chars = sample_characters("AAAA 가 ㄱㄱㄱ !!! 한", 10);
        assert_eq!(chars, vec!['가', '한']);
    }

    #[test]
    fn truncates_to_n() {
        let chars = sample_characters("가가가나나다", 2);
        assert_eq!(chars, vec!['가', '나']);
        assert!(sample_characters("가나다", 0).is_empty());
        assert!(sample_characters("", 200).is_empty());
    }

    #[test]
    fn sample_texts_give_characters() {
        let chars = sample_characters(&SAMPLE_TEXTS.concat(), 200);
        assert_eq!(chars[0], '다');
        assert!(chars.iter().all(|ch| is_hangul_syllable(*ch)));
    }

    #[tokio::test]
    async fn missing_or_empty_corpus_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = SAMPLE_TEXTS.concat();
        assert_eq!(load_corpus(&dir.path().join("absent.txt")).await, fallback);

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "").unwrap();
        assert_eq!(load_corpus(&empty).await, fallback);

        let invalid = dir.path().join("latin1.txt");
        std::fs::write(&invalid, [0xffu8, 0xfe, 0x41]).unwrap();
        assert_eq!(load_corpus(&invalid).await, fallback);

        let corpus = dir.path().join("korean_corpus.txt");
        std::fs::write(&corpus, "한글").unwrap();
        assert_eq!(load_corpus(&corpus).await, "한글");
    }
}
