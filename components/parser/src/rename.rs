//! Frequency-ordered identifier renaming.
//!
//! The renamer never reshapes the AST. It groups the chunk's name
//! occurrences into buckets of bindings that may safely share one new
//! name, orders the buckets by aggregate use-count, and writes generated
//! names straight into the chunk's name table.
//!
//! Bucketing walks the scope tree level by level with two frontiers. At
//! each scope the entries are sorted by descending use-count and merged
//! positionally into the level's buckets: the busiest entry of every
//! scope at this depth shares bucket 0, the second-busiest bucket 1, and
//! so on. Entries merged this way come from sibling scopes and can never
//! collide. Each finished level appends its buckets to a global list,
//! which is finally sorted by descending total use-count so the busiest
//! bucket program-wide gets the shortest name. The per-level merge is a
//! greedy approximation of a perfect global ranking and is kept as the
//! canonical behavior.

use crate::ast::{Chunk, NameId};
use crate::lexer::KEYWORDS;
use crate::scope::{ScopeAnalyzer, ScopeTree, RESERVED_GLOBALS};

/// Rename every non-reserved identifier in the chunk to the shortest
/// name its frequency rank allows.
pub fn rename_chunk(chunk: &mut Chunk) {
    let tree = ScopeAnalyzer::analyze(chunk);
    let buckets = collect_buckets(&tree);
    let mut generator = NameGenerator::new();
    for bucket in &buckets {
        let name = generator.next_name();
        for &id in bucket {
            chunk.names[id.index()] = name.clone();
        }
    }
}

/// Level-order bucket aggregation over the scope tree, sorted globally
/// by descending use-count.
fn collect_buckets(tree: &ScopeTree) -> Vec<Vec<NameId>> {
    let mut global: Vec<Vec<NameId>> = Vec::new();
    let mut level: Vec<Vec<NameId>> = Vec::new();

    let mut frontier: Vec<usize> = vec![0];
    let mut next_frontier: Vec<usize> = Vec::new();

    while !frontier.is_empty() {
        while let Some(index) = frontier.pop() {
            let scope = &tree.scopes[index];
            let mut entries: Vec<_> = scope.entries.iter().collect();
            entries.sort_by(|a, b| b.uses.len().cmp(&a.uses.len()));

            for (rank, entry) in entries.iter().enumerate() {
                if rank < level.len() {
                    level[rank].extend(entry.uses.iter().copied());
                } else {
                    level.push(entry.uses.clone());
                }
            }
            next_frontier.extend(scope.children.iter().rev());
        }
        global.append(&mut level);
        std::mem::swap(&mut frontier, &mut next_frontier);
    }

    global.sort_by(|a, b| b.len().cmp(&a.len()));
    global
}

const LEADING: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const FULL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_0123456789";

/// Odometer over shortest valid identifiers: `a`..`z`, `A`..`Z`, `_`,
/// then two characters with the leading position cycling fastest and
/// trailing positions drawing digits too. Generated names that collide
/// with a Lua keyword or a reserved global are skipped.
pub struct NameGenerator {
    digits: Vec<usize>,
    started: bool,
}

impl NameGenerator {
    /// Create a generator positioned before the first name.
    pub fn new() -> Self {
        NameGenerator {
            digits: vec![0],
            started: false,
        }
    }

    /// The next usable name.
    pub fn next_name(&mut self) -> String {
        loop {
            let name = self.advance();
            if !is_reserved_word(&name) {
                return name;
            }
        }
    }

    fn advance(&mut self) -> String {
        if !self.started {
            self.started = true;
            return self.render();
        }
        self.digits[0] += 1;
        if self.digits[0] == LEADING.len() {
            self.digits[0] = 0;
            let mut carried = false;
            for digit in self.digits.iter_mut().skip(1) {
                *digit += 1;
                if *digit == FULL.len() {
                    *digit = 0;
                } else {
                    carried = true;
                    break;
                }
            }
            if !carried {
                self.digits.push(1);
            }
        }
        self.render()
    }

    fn render(&self) -> String {
        self.digits.iter().map(|&d| FULL[d] as char).collect()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_reserved_word(name: &str) -> bool {
    KEYWORDS.contains(&name)
        || matches!(name, "and" | "or" | "not")
        || RESERVED_GLOBALS.contains(&name)
}
