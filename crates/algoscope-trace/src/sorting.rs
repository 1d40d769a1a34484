//! Sorting recorders: bubble, insertion, merge, quick.
//!
//! Each recorder copies the input sequence, runs the canonical algorithm over
//! the copy, and records a `StepEvent` for every comparison, swap and write.
//! Comparison highlights are bracketed with `ClearHighlight` so the view
//! never accumulates stale marks.

use algoscope_dataset::Sequence;

use crate::event::{StepEvent, Trace};

/// Bubble sort: adjacent compare-and-swap passes; the largest unsorted value
/// settles at the end of each pass.
pub fn bubble_sort(seq: &Sequence) -> Trace {
    let mut values = seq.values().to_vec();
    let n = values.len();
    if n == 0 {
        return Trace::default();
    }

    let mut events = Vec::new();
    for pass in 0..n - 1 {
        for j in 0..n - 1 - pass {
            events.push(StepEvent::Compare { a: j, b: j + 1 });
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                events.push(StepEvent::Swap { a: j, b: j + 1 });
            }
            events.push(StepEvent::ClearHighlight {
                indices: vec![j, j + 1],
            });
        }
        events.push(StepEvent::MarkSorted {
            indices: vec![n - 1 - pass],
        });
    }
    events.push(StepEvent::MarkSorted { indices: vec![0] });
    Trace::from_events(events)
}

/// Insertion sort: grow a sorted prefix, shifting larger values right to make
/// room for each key.
pub fn insertion_sort(seq: &Sequence) -> Trace {
    let mut values = seq.values().to_vec();
    let n = values.len();
    if n == 0 {
        return Trace::default();
    }

    let mut events = Vec::new();
    for i in 1..n {
        let key = values[i];
        let mut j = i;
        while j > 0 {
            events.push(StepEvent::Compare { a: j - 1, b: j });
            let shift = values[j - 1] > key;
            if shift {
                values[j] = values[j - 1];
                events.push(StepEvent::Overwrite {
                    index: j,
                    value: values[j],
                });
            }
            events.push(StepEvent::ClearHighlight {
                indices: vec![j - 1, j],
            });
            if !shift {
                break;
            }
            j -= 1;
        }
        values[j] = key;
        events.push(StepEvent::Overwrite {
            index: j,
            value: key,
        });
    }
    events.push(StepEvent::MarkSorted {
        indices: (0..n).collect(),
    });
    Trace::from_events(events)
}

/// Top-down recursive merge sort. Stable: ties take the left element.
pub fn merge_sort(seq: &Sequence) -> Trace {
    let mut values = seq.values().to_vec();
    let n = values.len();
    if n == 0 {
        return Trace::default();
    }

    let mut events = Vec::new();
    sort_range(&mut values, 0, n, &mut events);
    events.push(StepEvent::MarkSorted {
        indices: (0..n).collect(),
    });
    Trace::from_events(events)
}

fn sort_range(values: &mut [u32], lo: usize, hi: usize, events: &mut Vec<StepEvent>) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    sort_range(values, lo, mid, events);
    sort_range(values, mid, hi, events);
    merge(values, lo, mid, hi, events);
}

fn merge(values: &mut [u32], lo: usize, mid: usize, hi: usize, events: &mut Vec<StepEvent>) {
    let left = values[lo..mid].to_vec();
    let right = values[mid..hi].to_vec();

    let (mut i, mut j, mut k) = (0, 0, lo);
    while i < left.len() && j < right.len() {
        events.push(StepEvent::Compare {
            a: lo + i,
            b: mid + j,
        });
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        values[k] = value;
        events.push(StepEvent::Overwrite { index: k, value });
        events.push(StepEvent::ClearHighlight {
            indices: vec![lo + i.min(left.len() - 1), mid + j.min(right.len() - 1)],
        });
        k += 1;
    }
    while i < left.len() {
        values[k] = left[i];
        events.push(StepEvent::Overwrite {
            index: k,
            value: left[i],
        });
        i += 1;
        k += 1;
    }
    while j < right.len() {
        values[k] = right[j];
        events.push(StepEvent::Overwrite {
            index: k,
            value: right[j],
        });
        j += 1;
        k += 1;
    }
}

/// Quicksort with the last element of each range as pivot, partitioning in
/// place and recursing on the sub-ranges either side of the pivot.
pub fn quick_sort(seq: &Sequence) -> Trace {
    let mut values = seq.values().to_vec();
    let n = values.len();
    if n == 0 {
        return Trace::default();
    }

    let mut events = Vec::new();
    quick_range(&mut values, 0, n, &mut events);
    Trace::from_events(events)
}

fn quick_range(values: &mut [u32], lo: usize, hi: usize, events: &mut Vec<StepEvent>) {
    if hi - lo <= 1 {
        if hi - lo == 1 {
            events.push(StepEvent::MarkSorted { indices: vec![lo] });
        }
        return;
    }
    let p = partition(values, lo, hi, events);
    events.push(StepEvent::MarkSorted { indices: vec![p] });
    quick_range(values, lo, p, events);
    quick_range(values, p + 1, hi, events);
}

fn partition(values: &mut [u32], lo: usize, hi: usize, events: &mut Vec<StepEvent>) -> usize {
    let pivot_idx = hi - 1;
    let pivot = values[pivot_idx];
    events.push(StepEvent::MarkPivot { index: pivot_idx });

    let mut i = lo;
    for j in lo..pivot_idx {
        events.push(StepEvent::Compare { a: j, b: pivot_idx });
        if values[j] < pivot {
            if i != j {
                values.swap(i, j);
                events.push(StepEvent::Swap { a: i, b: j });
            }
            i += 1;
        }
        events.push(StepEvent::ClearHighlight { indices: vec![j] });
    }
    if i != pivot_idx {
        values.swap(i, pivot_idx);
        events.push(StepEvent::Swap {
            a: i,
            b: pivot_idx,
        });
    }
    events.push(StepEvent::ClearPivot { index: pivot_idx });
    i
}
