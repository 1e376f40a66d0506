//! Sorting producers
//!
//! Every comparison is reported as a `Compare` before any state change it
//! decides, and every swap or overwrite as a `Mutate` carrying the array
//! after the change. The final `Complete` marks every position sorted.

use super::{Algorithm, StepProducer};
use crate::stats::StatsCollector;
use crate::step::{Outcome, Step, Target};
use crate::structures::Structure;

fn compare(a: usize, b: usize) -> Step {
    Step::Compare {
        targets: vec![Target::Index(a), Target::Index(b)],
    }
}

fn mutate(values: &[i64], positions: &[usize]) -> Step {
    Step::Mutate {
        targets: positions.iter().map(|&i| Target::Index(i)).collect(),
        state: Structure::Array(values.to_vec()),
    }
}

fn finish(values: &[i64]) -> Step {
    let outcome = if values.is_empty() {
        Outcome::NothingToDo
    } else {
        Outcome::Sorted {
            positions: (0..values.len()).collect(),
        }
    };
    Step::Complete {
        state: Structure::Array(values.to_vec()),
        outcome,
    }
}

/// Adjacent-pair bubble sort
pub struct BubbleSort {
    values: Vec<i64>,
    pass: usize,
    j: usize,
    swap_pending: bool,
    done: bool,
}

impl BubbleSort {
    pub fn new(values: Vec<i64>) -> Self {
        BubbleSort {
            values,
            pass: 0,
            j: 0,
            swap_pending: false,
            done: false,
        }
    }
}

impl StepProducer for BubbleSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BubbleSort
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }
        if self.swap_pending {
            self.swap_pending = false;
            let j = self.j;
            self.values.swap(j, j + 1);
            self.j += 1;
            return Some(mutate(&self.values, &[j, j + 1]));
        }

        let n = self.values.len();
        while n >= 2 && self.pass < n - 1 {
            if self.j < n - self.pass - 1 {
                let j = self.j;
                if self.values[j] > self.values[j + 1] {
                    self.swap_pending = true;
                } else {
                    self.j += 1;
                }
                return Some(compare(j, j + 1));
            }
            self.pass += 1;
            self.j = 0;
        }

        self.done = true;
        Some(finish(&self.values))
    }

    fn structure(&self) -> Structure {
        Structure::Array(self.values.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.values.is_empty()
    }
}

/// Selection sort; swaps only when the minimum moved
pub struct SelectionSort {
    values: Vec<i64>,
    i: usize,
    j: usize,
    min: usize,
    done: bool,
}

impl SelectionSort {
    pub fn new(values: Vec<i64>) -> Self {
        SelectionSort {
            values,
            i: 0,
            j: 1,
            min: 0,
            done: false,
        }
    }
}

impl StepProducer for SelectionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::SelectionSort
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }

        let n = self.values.len();
        while self.i + 1 < n {
            if self.j < n {
                let (min, j) = (self.min, self.j);
                if self.values[j] < self.values[min] {
                    self.min = j;
                }
                self.j += 1;
                return Some(compare(min, j));
            }

            let (i, min) = (self.i, self.min);
            self.i += 1;
            self.min = self.i;
            self.j = self.i + 1;
            if min != i {
                self.values.swap(i, min);
                return Some(mutate(&self.values, &[i, min]));
            }
        }

        self.done = true;
        Some(finish(&self.values))
    }

    fn structure(&self) -> Structure {
        Structure::Array(self.values.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.values.is_empty()
    }
}

/// Insertion sort, sinking each new element by adjacent swaps
pub struct InsertionSort {
    values: Vec<i64>,
    i: usize,
    j: usize,
    swap_pending: bool,
    done: bool,
}

impl InsertionSort {
    pub fn new(values: Vec<i64>) -> Self {
        InsertionSort {
            values,
            i: 1,
            j: 1,
            swap_pending: false,
            done: false,
        }
    }
}

impl StepProducer for InsertionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::InsertionSort
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }
        if self.swap_pending {
            self.swap_pending = false;
            let j = self.j;
            self.values.swap(j - 1, j);
            self.j -= 1;
            return Some(mutate(&self.values, &[j - 1, j]));
        }

        let n = self.values.len();
        while self.i < n {
            if self.j > 0 {
                let j = self.j;
                if self.values[j - 1] > self.values[j] {
                    self.swap_pending = true;
                } else {
                    // Already in place; end this insertion
                    self.j = 0;
                }
                return Some(compare(j - 1, j));
            }
            self.i += 1;
            self.j = self.i;
        }

        self.done = true;
        Some(finish(&self.values))
    }

    fn structure(&self) -> Structure {
        Structure::Array(self.values.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.values.is_empty()
    }
}

enum MergeTask {
    Sort { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

/// A merge of `values[lo..=mid]` and `values[mid + 1..=hi]` in progress
struct Merging {
    lo: usize,
    mid: usize,
    left: Vec<i64>,
    right: Vec<i64>,
    i: usize,
    j: usize,
    k: usize,
    pending: Option<i64>,
}

impl Merging {
    fn new(values: &[i64], lo: usize, mid: usize, hi: usize) -> Self {
        Merging {
            lo,
            mid,
            left: values[lo..=mid].to_vec(),
            right: values[mid + 1..=hi].to_vec(),
            i: 0,
            j: 0,
            k: lo,
            pending: None,
        }
    }
}

/// Top-down merge sort: left half, right half, then merge
pub struct MergeSort {
    values: Vec<i64>,
    tasks: Vec<MergeTask>,
    merging: Option<Merging>,
    done: bool,
}

impl MergeSort {
    pub fn new(values: Vec<i64>) -> Self {
        let tasks = if values.len() > 1 {
            vec![MergeTask::Sort {
                lo: 0,
                hi: values.len() - 1,
            }]
        } else {
            Vec::new()
        };
        MergeSort {
            values,
            tasks,
            merging: None,
            done: false,
        }
    }

    fn write(&mut self, k: usize, value: i64) -> Step {
        self.values[k] = value;
        mutate(&self.values, &[k])
    }
}

impl StepProducer for MergeSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MergeSort
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }

        loop {
            if let Some(m) = self.merging.as_mut() {
                let next_write = if let Some(value) = m.pending.take() {
                    Some(value)
                } else if m.i < m.left.len() && m.j < m.right.len() {
                    let (a, b) = (m.lo + m.i, m.mid + 1 + m.j);
                    if m.left[m.i] <= m.right[m.j] {
                        m.pending = Some(m.left[m.i]);
                        m.i += 1;
                    } else {
                        m.pending = Some(m.right[m.j]);
                        m.j += 1;
                    }
                    return Some(compare(a, b));
                } else if m.i < m.left.len() {
                    m.i += 1;
                    Some(m.left[m.i - 1])
                } else if m.j < m.right.len() {
                    m.j += 1;
                    Some(m.right[m.j - 1])
                } else {
                    None
                };

                match next_write {
                    Some(value) => {
                        let k = m.k;
                        m.k += 1;
                        return Some(self.write(k, value));
                    }
                    None => self.merging = None,
                }
            }

            match self.tasks.pop() {
                Some(MergeTask::Sort { lo, hi }) => {
                    if lo < hi {
                        let mid = lo + (hi - lo) / 2;
                        // Popped in reverse: left, right, merge
                        self.tasks.push(MergeTask::Merge { lo, mid, hi });
                        self.tasks.push(MergeTask::Sort { lo: mid + 1, hi });
                        self.tasks.push(MergeTask::Sort { lo, hi: mid });
                    }
                }
                Some(MergeTask::Merge { lo, mid, hi }) => {
                    self.merging = Some(Merging::new(&self.values, lo, mid, hi));
                }
                None => break,
            }
        }

        self.done = true;
        Some(finish(&self.values))
    }

    fn structure(&self) -> Structure {
        Structure::Array(self.values.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.values.is_empty()
    }
}

/// Lomuto partition over `values[lo..=hi]`, pivot at `hi`
struct Partition {
    lo: usize,
    hi: usize,
    pivot: i64,
    store: usize,
    j: usize,
}

/// Quick sort with Lomuto partitioning, left partition first
pub struct QuickSort {
    values: Vec<i64>,
    ranges: Vec<(usize, usize)>,
    partition: Option<Partition>,
    swap_pending: bool,
    done: bool,
}

impl QuickSort {
    pub fn new(values: Vec<i64>) -> Self {
        let ranges = if values.len() > 1 {
            vec![(0, values.len() - 1)]
        } else {
            Vec::new()
        };
        QuickSort {
            values,
            ranges,
            partition: None,
            swap_pending: false,
            done: false,
        }
    }
}

impl StepProducer for QuickSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::QuickSort
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }

        loop {
            if let Some(p) = self.partition.as_mut() {
                if self.swap_pending {
                    self.swap_pending = false;
                    let (store, j) = (p.store, p.j);
                    p.store += 1;
                    p.j += 1;
                    self.values.swap(store, j);
                    return Some(mutate(&self.values, &[store, j]));
                }

                if p.j < p.hi {
                    let (j, hi) = (p.j, p.hi);
                    if self.values[j] < p.pivot {
                        if p.store != j {
                            self.swap_pending = true;
                        } else {
                            // Swapping an element with itself changes nothing
                            p.store += 1;
                            p.j += 1;
                        }
                    } else {
                        p.j += 1;
                    }
                    return Some(compare(j, hi));
                }

                let (lo, hi, store) = (p.lo, p.hi, p.store);
                self.partition = None;
                self.values.swap(store, hi);
                // Stack order: left partition is popped first
                if store + 1 < hi {
                    self.ranges.push((store + 1, hi));
                }
                if store > lo + 1 {
                    self.ranges.push((lo, store - 1));
                }
                return Some(mutate(&self.values, &[store, hi]));
            }

            match self.ranges.pop() {
                Some((lo, hi)) => {
                    self.partition = Some(Partition {
                        lo,
                        hi,
                        pivot: self.values[hi],
                        store: lo,
                        j: lo,
                    });
                }
                None => break,
            }
        }

        self.done = true;
        Some(finish(&self.values))
    }

    fn structure(&self) -> Structure {
        Structure::Array(self.values.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producers::testing::drain;

    fn all_sorters(values: &[i64]) -> Vec<Box<dyn StepProducer>> {
        vec![
            Box::new(BubbleSort::new(values.to_vec())),
            Box::new(SelectionSort::new(values.to_vec())),
            Box::new(InsertionSort::new(values.to_vec())),
            Box::new(MergeSort::new(values.to_vec())),
            Box::new(QuickSort::new(values.to_vec())),
        ]
    }

    fn final_array(steps: &[Step]) -> Vec<i64> {
        match steps.last() {
            Some(Step::Complete {
                state: Structure::Array(values),
                ..
            }) => values.clone(),
            other => panic!("expected a final Complete, got {:?}", other),
        }
    }

    #[test]
    fn test_quick_sort_scenario() {
        let mut producer = QuickSort::new(vec![5, 1, 4, 2, 8]);
        let (steps, stats) = drain(&mut producer);

        assert_eq!(final_array(&steps), vec![1, 2, 4, 5, 8]);
        assert_eq!(stats.swaps, 4);
        match steps.last() {
            Some(Step::Complete { outcome, .. }) => assert_eq!(
                outcome,
                &Outcome::Sorted {
                    positions: vec![0, 1, 2, 3, 4]
                }
            ),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_quick_sort_compares_against_pivot() {
        let mut producer = QuickSort::new(vec![3, 1, 2]);
        let mut stats = StatsCollector::new();
        let first = producer.next_step(&mut stats);
        assert_eq!(
            first,
            Some(Step::Compare {
                targets: vec![Target::Index(0), Target::Index(2)]
            })
        );
    }

    #[test]
    fn test_all_sorters_sort() {
        let input = [9, -3, 5, 5, 0, 12, 1, 7];
        for mut producer in all_sorters(&input) {
            let (steps, _) = drain(producer.as_mut());
            assert_eq!(
                final_array(&steps),
                vec![-3, 0, 1, 5, 5, 7, 9, 12],
                "{} failed",
                producer.algorithm()
            );
            assert_eq!(steps.iter().filter(|s| s.is_complete()).count(), 1);
        }
    }

    #[test]
    fn test_empty_array_is_nothing_to_do() {
        for mut producer in all_sorters(&[]) {
            assert!(producer.nothing_to_do());
            let (steps, stats) = drain(producer.as_mut());
            assert_eq!(steps.len(), 1);
            assert!(matches!(
                &steps[0],
                Step::Complete {
                    outcome: Outcome::NothingToDo,
                    ..
                }
            ));
            assert_eq!(stats.comparisons, 0);
        }
    }

    #[test]
    fn test_single_element() {
        for mut producer in all_sorters(&[42]) {
            assert!(!producer.nothing_to_do());
            let (steps, _) = drain(producer.as_mut());
            assert_eq!(steps.len(), 1);
            assert_eq!(final_array(&steps), vec![42]);
        }
    }

    #[test]
    fn test_exhausted_after_complete() {
        let mut producer = BubbleSort::new(vec![2, 1]);
        let mut stats = StatsCollector::new();
        while let Some(step) = producer.next_step(&mut stats) {
            if step.is_complete() {
                break;
            }
        }
        assert_eq!(producer.next_step(&mut stats), None);
    }

    #[test]
    fn test_bubble_compare_precedes_swap() {
        let mut producer = BubbleSort::new(vec![2, 1]);
        let (steps, stats) = drain(&mut producer);
        assert!(matches!(steps[0], Step::Compare { .. }));
        assert!(matches!(steps[1], Step::Mutate { .. }));
        assert_eq!(stats.comparisons, 1);
        assert_eq!(stats.swaps, 1);
    }

    #[test]
    fn test_merge_sort_merges_left_half_first() {
        let mut producer = MergeSort::new(vec![4, 3, 2, 1]);
        let (steps, _) = drain(&mut producer);
        // First merge is (0, 0, 1): compare index 0 with index 1
        assert_eq!(
            steps[0],
            Step::Compare {
                targets: vec![Target::Index(0), Target::Index(1)]
            }
        );
        // Second merge is the right half (2, 2, 3)
        let second_compare = steps
            .iter()
            .filter(|s| matches!(s, Step::Compare { .. }))
            .nth(1)
            .cloned();
        assert_eq!(
            second_compare,
            Some(Step::Compare {
                targets: vec![Target::Index(2), Target::Index(3)]
            })
        );
    }
}
