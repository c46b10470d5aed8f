use std::io::{Cursor, Read, Seek};

use calamine::{Data, Ods, Range, Reader, Xls, Xlsx};

use super::FileKind;
use crate::error::{Result, TermMatchError};
use term_match_common::Table;

/// ワークブックの先頭シートを表に変換
pub fn parse_workbook(kind: FileKind, bytes: Vec<u8>) -> Result<Table> {
    let cursor = Cursor::new(bytes);
    let range = match kind {
        FileKind::Xlsx => first_sheet(kind, Xlsx::new(cursor).map_err(calamine::Error::from)?)?,
        FileKind::Xls => first_sheet(kind, Xls::new(cursor).map_err(calamine::Error::from)?)?,
        FileKind::Ods => first_sheet(kind, Ods::new(cursor).map_err(calamine::Error::from)?)?,
        FileKind::Delimited(_) | FileKind::Unsupported => return Ok(Table::default()),
    };
    Ok(range_to_table(&range))
}

fn first_sheet<RS, R>(kind: FileKind, mut workbook: R) -> Result<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    calamine::Error: From<R::Error>,
{
    let name = workbook.sheet_names().first().cloned().unwrap_or_default();
    tracing::debug!(sheet = %name, "reading first sheet");
    sheet_range(kind, workbook.worksheet_range_at(0))
}

/// 先頭シートの読み込み結果を取り出す（シートなしはエラー）
fn sheet_range<E>(kind: FileKind, found: Option<std::result::Result<Range<Data>, E>>) -> Result<Range<Data>>
where
    calamine::Error: From<E>,
{
    let range = found
        .ok_or_else(|| TermMatchError::NoSheet(kind.label().to_string()))?
        .map_err(calamine::Error::from)?;
    Ok(range)
}

/// 使用範囲を表に変換
///
/// 範囲がA列から始まらない場合は左側を空セルで埋め、列番号を
/// シートの列記号と一致させる。全セルが空の行は除外する。
fn range_to_table(range: &Range<Data>) -> Table {
    let start_column = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let rows = range
        .rows()
        .filter_map(|cells| {
            let mut row: Vec<String> = std::iter::repeat(String::new())
                .take(start_column)
                .chain(cells.iter().map(cell_text))
                .collect();
            while row.last().is_some_and(|c| c.is_empty()) {
                row.pop();
            }
            if row.is_empty() {
                None
            } else {
                Some(row)
            }
        })
        .collect();

    Table::new(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}
