//! 用語のチェック状態管理
//!
//! 照合結果の各出現（行番号とその行内の位置）ごとにチェック状態を持つ。
//! Globalモードでは同じ用語の全出現を常に同じ状態に保ち、
//! Localモードでは出現ごとに独立して切り替える。

use std::collections::HashSet;

use crate::types::{MatchResult, SelectionMode};

/// 照合結果とそのチェック状態
#[derive(Debug, Clone, Default)]
pub struct Selection {
    results: Vec<MatchResult>,
    checked: Vec<Vec<bool>>,
    mode: SelectionMode,
}

impl Selection {
    /// 照合結果から作成（全出現をチェック済みにする）
    pub fn new(results: Vec<MatchResult>, mode: SelectionMode) -> Self {
        let checked = results
            .iter()
            .map(|r| vec![true; r.matched_terms.len()])
            .collect();
        Self { results, checked, mode }
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn is_checked(&self, row: usize, slot: usize) -> bool {
        self.checked
            .get(row)
            .and_then(|r| r.get(slot))
            .copied()
            .unwrap_or(false)
    }

    /// いずれかの出現がチェックされていれば true
    pub fn is_term_checked(&self, term: &str) -> bool {
        self.occurrences(term).any(|(row, slot)| self.checked[row][slot])
    }

    /// 1つの出現を切り替える
    ///
    /// Globalモードでは同じ用語の全出現に反映する。範囲外は無視。
    pub fn toggle(&mut self, row: usize, slot: usize) {
        let Some(term) = self.term_at(row, slot).map(str::to_string) else {
            return;
        };
        let next = !self.checked[row][slot];
        match self.mode {
            SelectionMode::Global => self.set_term(&term, next),
            SelectionMode::Local => self.checked[row][slot] = next,
        }
    }

    /// 行内の用語をまとめて切り替える
    ///
    /// 全てチェック済みなら全て外し、そうでなければ全てチェックする。
    pub fn toggle_row(&mut self, row: usize) {
        let Some(states) = self.checked.get(row) else {
            return;
        };
        let next = !states.iter().all(|&c| c);
        match self.mode {
            SelectionMode::Global => {
                let terms = self.results[row].matched_terms.clone();
                for term in &terms {
                    self.set_term(term, next);
                }
            }
            SelectionMode::Local => {
                self.checked[row].iter_mut().for_each(|c| *c = next);
            }
        }
    }

    pub fn set_all(&mut self, checked: bool) {
        for row in &mut self.checked {
            row.iter_mut().for_each(|c| *c = checked);
        }
    }

    /// モード切り替え
    ///
    /// Local → Global では、いずれかの出現がチェックされている用語を
    /// 全出現チェック済みに揃える。
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == SelectionMode::Global {
            let checked: Vec<String> = self.checked_terms();
            let checked: HashSet<&str> = checked.iter().map(String::as_str).collect();
            for (result, states) in self.results.iter().zip(self.checked.iter_mut()) {
                for (term, state) in result.matched_terms.iter().zip(states.iter_mut()) {
                    *state = checked.contains(term.as_str());
                }
            }
        }
    }

    /// チェック済みの用語（重複除去、初出順）
    pub fn checked_terms(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for (result, states) in self.results.iter().zip(&self.checked) {
            for (term, &checked) in result.matched_terms.iter().zip(states) {
                if checked && seen.insert(term.as_str()) {
                    terms.push(term.clone());
                }
            }
        }
        terms
    }

    /// チェック済みの出現数
    pub fn checked_count(&self) -> usize {
        self.checked.iter().flatten().filter(|&&c| c).count()
    }

    fn term_at(&self, row: usize, slot: usize) -> Option<&str> {
        self.results
            .get(row)?
            .matched_terms
            .get(slot)
            .map(String::as_str)
    }

    fn occurrences<'a>(&'a self, term: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.results.iter().enumerate().flat_map(move |(row, result)| {
            result
                .matched_terms
                .iter()
                .enumerate()
                .filter(move |(_, t)| t.as_str() == term)
                .map(move |(slot, _)| (row, slot))
        })
    }

    fn set_term(&mut self, term: &str, checked: bool) {
        let positions: Vec<(usize, usize)> = self.occurrences(term).collect();
        for (row, slot) in positions {
            self.checked[row][slot] = checked;
        }
    }
}
