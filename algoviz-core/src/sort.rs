//! Step-by-step sorting algorithms.
//!
//! Every algorithm runs against a [`SortTape`] and pauses after each
//! comparison, swap or write so the intermediate state can be drawn.
//! Cancellation surfaces as `Err(Cancelled)` and unwinds through `?`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::array::Highlight;
use crate::tape::{Cancelled, SortTape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Quick => "Quick Sort",
        }
    }

    /// Run the algorithm to completion or until the tape is cancelled
    pub fn run<T: SortTape + ?Sized>(&self, tape: &mut T) -> Result<(), Cancelled> {
        match self {
            SortAlgorithm::Bubble => bubble(tape),
            SortAlgorithm::Selection => selection(tape),
            SortAlgorithm::Insertion => insertion(tape),
            SortAlgorithm::Merge => merge_sort(tape),
            SortAlgorithm::Quick => quick_sort(tape),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sorting algorithm `{0}` (expected bubble, selection, insertion, merge or quick)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for SortAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SortAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == wanted)
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

/// Adjacent compare-and-swap passes; stops after a pass with no swaps
fn bubble<T: SortTape + ?Sized>(tape: &mut T) -> Result<(), Cancelled> {
    let n = tape.len();
    for i in 0..n.saturating_sub(1) {
        tape.check()?;
        let mut swapped = false;
        for j in 0..n - 1 - i {
            tape.check()?;
            tape.highlight(Highlight::pair(j, j + 1));
            tape.publish();
            if tape.get(j) > tape.get(j + 1) {
                tape.swap(j, j + 1);
                swapped = true;
            }
            tape.pause()?;
        }
        if !swapped {
            break;
        }
        tape.publish();
    }
    Ok(())
}

fn selection<T: SortTape + ?Sized>(tape: &mut T) -> Result<(), Cancelled> {
    let n = tape.len();
    for i in 0..n.saturating_sub(1) {
        tape.check()?;
        let mut min = i;
        for j in i + 1..n {
            tape.check()?;
            tape.highlight(Highlight::pair(i, j));
            tape.publish();
            if tape.get(j) < tape.get(min) {
                min = j;
            }
            tape.pause()?;
        }
        if min != i {
            tape.swap(i, min);
        }
        tape.publish();
    }
    Ok(())
}

fn insertion<T: SortTape + ?Sized>(tape: &mut T) -> Result<(), Cancelled> {
    for i in 1..tape.len() {
        tape.check()?;
        let key = tape.get(i);
        // `j` is one past the slot being compared, so it never underflows
        let mut j = i;
        tape.highlight(Highlight::pair(i, i - 1));
        tape.publish();

        while j > 0 && tape.get(j - 1) > key {
            // Slot `j` is the hole; the key goes back into it on cancel
            if tape.is_cancelled() {
                tape.set(j, key);
                return Err(Cancelled);
            }
            let shifted = tape.get(j - 1);
            tape.set(j, shifted);
            tape.highlight(Highlight::pair(j - 1, j));
            j -= 1;
            if let Err(cancelled) = tape.pause() {
                tape.set(j, key);
                return Err(cancelled);
            }
        }
        tape.set(j, key);
        tape.publish();
        tape.pause()?;
    }
    Ok(())
}

fn merge_sort<T: SortTape + ?Sized>(tape: &mut T) -> Result<(), Cancelled> {
    tape.check()?;
    if tape.len() > 1 {
        merge_range(tape, 0, tape.len() - 1)?;
    }
    Ok(())
}

/// Recursion over `left..=right`. Only the merge step looks at the token.
fn merge_range<T: SortTape + ?Sized>(
    tape: &mut T,
    left: usize,
    right: usize,
) -> Result<(), Cancelled> {
    if left < right {
        let mid = left + (right - left) / 2;
        merge_range(tape, left, mid)?;
        merge_range(tape, mid + 1, right)?;
        merge(tape, left, mid, right)?;
    }
    Ok(())
}

fn merge<T: SortTape + ?Sized>(
    tape: &mut T,
    left: usize,
    mid: usize,
    right: usize,
) -> Result<(), Cancelled> {
    let lhs: Vec<i32> = (left..=mid).map(|i| tape.get(i)).collect();
    let rhs: Vec<i32> = (mid + 1..=right).map(|i| tape.get(i)).collect();
    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lhs.len() || j < rhs.len() {
        if tape.is_cancelled() {
            write_back(tape, k, &lhs[i..], &rhs[j..]);
            return Err(Cancelled);
        }
        tape.highlight(Highlight::single(k));
        let take_left = j >= rhs.len() || (i < lhs.len() && lhs[i] <= rhs[j]);
        if take_left {
            tape.set(k, lhs[i]);
            i += 1;
        } else {
            tape.set(k, rhs[j]);
            j += 1;
        }
        k += 1;
        if let Err(cancelled) = tape.pause() {
            write_back(tape, k, &lhs[i..], &rhs[j..]);
            return Err(cancelled);
        }
    }
    Ok(())
}

/// Copy the unmerged remainder into the segment so it stays a permutation of its input
fn write_back<T: SortTape + ?Sized>(tape: &mut T, from: usize, lhs: &[i32], rhs: &[i32]) {
    for (offset, &value) in lhs.iter().chain(rhs).enumerate() {
        tape.set(from + offset, value);
    }
}

fn quick_sort<T: SortTape + ?Sized>(tape: &mut T) -> Result<(), Cancelled> {
    if tape.len() > 1 {
        quick_range(tape, 0, tape.len() - 1)?;
    }
    Ok(())
}

fn quick_range<T: SortTape + ?Sized>(
    tape: &mut T,
    low: usize,
    high: usize,
) -> Result<(), Cancelled> {
    tape.check()?;
    if low < high {
        let pivot = partition(tape, low, high)?;
        if pivot > low {
            quick_range(tape, low, pivot - 1)?;
        }
        quick_range(tape, pivot + 1, high)?;
    }
    Ok(())
}

/// Partition `low..=high` around `tape[low]` and return the pivot's final slot
fn partition<T: SortTape + ?Sized>(
    tape: &mut T,
    low: usize,
    high: usize,
) -> Result<usize, Cancelled> {
    tape.check()?;
    let pivot = tape.get(low);
    let mut i = low + 1;
    let mut j = high;

    while i <= j {
        tape.check()?;

        while i <= j && tape.get(i) <= pivot {
            tape.check()?;
            i += 1;
            tape.highlight(Highlight::single(i));
            tape.pause()?;
        }

        while i <= j && tape.get(j) > pivot {
            tape.check()?;
            j -= 1;
            tape.highlight(Highlight::single(j));
            tape.pause()?;
        }

        if i < j {
            tape.check()?;
            tape.swap(i, j);
            tape.pause()?;
        }
    }

    tape.swap(low, j);
    tape.pause()?;
    Ok(j)
}
