use crate::error::Result;
use term_match_common::Table;

const DELIMITER_CANDIDATES: &[u8] = b",\t;|";

/// 区切り文字の推定に使う先頭レコード数
const SNIFF_RECORDS: usize = 10;

/// 先頭のレコードから区切り文字を推定（該当なしはカンマ）
///
/// 候補ごとに実際にCSVとして読み、平均2列以上になるもののうち
/// 行ごとの列数のばらつきが最も小さいものを選ぶ。引用符内の区切り文字は
/// CSVリーダーが1セルとして扱うので数えない。
pub fn sniff_delimiter(text: &str) -> u8 {
    let mut best: Option<(u8, usize, f64)> = None;

    for &candidate in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = csv::ReaderBuilder::new()
            .delimiter(candidate)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes())
            .records()
            .filter_map(|record| record.ok())
            .filter(|record| !(record.len() == 1 && record[0].is_empty()))
            .take(SNIFF_RECORDS)
            .map(|record| record.len())
            .collect();
        if counts.is_empty() {
            continue;
        }

        let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if average < 2.0 {
            continue;
        }
        let delta: usize = counts.windows(2).map(|w| w[0].abs_diff(w[1])).sum();

        let better = match best {
            None => true,
            Some((_, best_delta, best_average)) => {
                delta < best_delta || (delta == best_delta && average > best_average)
            }
        };
        if better {
            best = Some((candidate, delta, average));
        }
    }

    best.map(|(delimiter, _, _)| delimiter).unwrap_or(b',')
}

/// 区切りテキストを表に変換
///
/// 行ごとのセル数は揃っていなくてもよい。空行は読み飛ばす。
pub fn parse_delimited(text: &str, delimiter: Option<u8>) -> Result<Table> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(text));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(delimiter = %char::from(delimiter).escape_default(), rows = rows.len(), "delimited text parsed");
    Ok(Table::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("\n\na;b;c"), b';');
        assert_eq!(sniff_delimiter("a|b"), b'|');
        assert_eq!(sniff_delimiter("single column"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_sniff_ignores_delimiters_inside_quotes() {
        let text = "apple,\"fruit; red; sweet\"\nbanana,yellow\n";
        assert_eq!(sniff_delimiter(text), b',');

        let table = parse_delimited(text, None).unwrap();
        assert_eq!(table.cell(0, 0), Some("apple"));
        assert_eq!(table.cell(0, 1), Some("fruit; red; sweet"));
        assert_eq!(table.cell(1, 1), Some("yellow"));
    }

    #[test]
    fn test_sniff_prefers_consistent_column_count() {
        // 1行目だけ見るとカンマが多いが、全体ではセミコロン区切り
        let text = "a,b,c;1\nx;2\ny;3\n";
        assert_eq!(sniff_delimiter(text), b';');
    }

    #[test]
    fn test_parse_csv_with_quotes() {
        let text = "source,target\n\"apple, red\",사과\n\"say \"\"hi\"\"\",안녕\n";
        let table = parse_delimited(text, None).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(1, 0), Some("apple, red"));
        assert_eq!(table.cell(1, 1), Some("사과"));
        assert_eq!(table.cell(2, 0), Some("say \"hi\""));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_allows_ragged_rows() {
        let text = "term\n\napple,extra\r\n\r\nbanana\n";
        let table = parse_delimited(text, None).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1], vec!["apple", "extra"]);
        assert_eq!(table.rows()[2], vec!["banana"]);
    }

    #[test]
    fn test_parse_strips_bom() {
        let table = parse_delimited("\u{feff}term\napple", None).unwrap();
        assert_eq!(table.cell(0, 0), Some("term"));
    }

    #[test]
    fn test_parse_tab_separated() {
        let table = parse_delimited("ko\tja\n용어\t用語", Some(b'\t')).unwrap();
        assert_eq!(table.cell(1, 1), Some("用語"));
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_delimited("", None).unwrap().is_empty());
    }
}
