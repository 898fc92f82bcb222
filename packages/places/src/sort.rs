//! Stable merge sort that follows the run detection, binary insertion and
//! galloping merge steps of the TimSort used by V8's `Array.prototype.sort`.
//!
//! The comparator may be inconsistent (e.g. `NaN` comparing equal to
//! everything). The element order produced for such comparators is
//! deterministic and matches the order a browser or Node.js would produce,
//! and the sort never panics or loses elements.

use std::cmp::Ordering;

/// Initial threshold of consecutive wins before switching to galloping.
const MIN_GALLOP: usize = 7;

/// Sorts `v` in place with `cmp`.
pub fn tim_sort<T: Copy>(v: &mut [T], cmp: impl Fn(&T, &T) -> Ordering) {
    let n = v.len();
    if n < 2 {
        return;
    }

    let lt = |a: &T, b: &T| cmp(a, b) == Ordering::Less;
    let mut state = MergeState {
        runs: Vec::new(),
        min_gallop: MIN_GALLOP,
    };

    let min_run = min_run_length(n);
    let mut low = 0;
    let mut remaining = n;

    while remaining != 0 {
        let mut run = count_and_make_run(v, &lt, low, low + remaining);
        if run < min_run {
            let forced = min_run.min(remaining);
            binary_insertion_sort(v, &lt, low, low + run, low + forced);
            run = forced;
        }

        state.runs.push((low, run));
        state.merge_collapse(v, &lt);

        low += run;
        remaining -= run;
    }

    state.merge_force_collapse(v, &lt);
}

const fn min_run_length(mut n: usize) -> usize {
    let mut r = 0;
    while n >= 64 {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

/// Finds the run starting at `low`, reversing it in place if it is strictly
/// descending, and returns its length.
fn count_and_make_run<T>(
    v: &mut [T],
    lt: &impl Fn(&T, &T) -> bool,
    low: usize,
    high: usize,
) -> usize {
    let next = low + 1;
    if next == high {
        return 1;
    }

    let descending = lt(&v[next], &v[low]);
    let mut run = 2;
    let mut prev = next;

    for idx in next + 1..high {
        let less = lt(&v[idx], &v[prev]);
        if descending != less {
            break;
        }
        prev = idx;
        run += 1;
    }

    if descending {
        v[low..low + run].reverse();
    }

    run
}

/// Extends the sorted prefix `v[low..start]` to `v[low..high]`.
fn binary_insertion_sort<T: Copy>(
    v: &mut [T],
    lt: &impl Fn(&T, &T) -> bool,
    low: usize,
    start: usize,
    high: usize,
) {
    let mut start = if low == start { start + 1 } else { start };

    while start < high {
        let pivot = v[start];
        let mut left = low;
        let mut right = start;

        while left < right {
            let mid = left + ((right - left) >> 1);
            if lt(&pivot, &v[mid]) {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        v.copy_within(left..start, left + 1);
        v[left] = pivot;
        start += 1;
    }
}

/// Leftmost position in `v[base..base + len]` at which `key` can be
/// inserted, searching outwards from `hint`.
fn gallop_left<T>(
    v: &[T],
    lt: &impl Fn(&T, &T) -> bool,
    key: &T,
    base: usize,
    len: usize,
    hint: usize,
) -> usize {
    let mut last_ofs = 0;
    let mut offset = 1;

    let (mut lo, mut hi) = if lt(&v[base + hint], key) {
        let max_ofs = len - hint;
        while offset < max_ofs {
            if !lt(&v[base + hint + offset], key) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        (hint + last_ofs + 1, hint + offset)
    } else {
        let max_ofs = hint + 1;
        while offset < max_ofs {
            if lt(&v[base + hint - offset], key) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        (hint + 1 - offset, hint - last_ofs)
    };

    while lo < hi {
        let mid = lo + ((hi - lo) >> 1);
        if lt(&v[base + mid], key) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    hi
}

/// Rightmost position in `v[base..base + len]` at which `key` can be
/// inserted, searching outwards from `hint`.
fn gallop_right<T>(
    v: &[T],
    lt: &impl Fn(&T, &T) -> bool,
    key: &T,
    base: usize,
    len: usize,
    hint: usize,
) -> usize {
    let mut last_ofs = 0;
    let mut offset = 1;

    let (mut lo, mut hi) = if lt(key, &v[base + hint]) {
        let max_ofs = hint + 1;
        while offset < max_ofs {
            if !lt(key, &v[base + hint - offset]) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        (hint + 1 - offset, hint - last_ofs)
    } else {
        let max_ofs = len - hint;
        while offset < max_ofs {
            if lt(key, &v[base + hint + offset]) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        (hint + last_ofs + 1, hint + offset)
    };

    while lo < hi {
        let mid = lo + ((hi - lo) >> 1);
        if lt(key, &v[base + mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    hi
}

enum MergeEnd {
    Done,
    LastFromA,
    FirstFromB,
}

struct MergeState {
    /// Pending runs as `(base, len)`.
    runs: Vec<(usize, usize)>,
    min_gallop: usize,
}

impl MergeState {
    fn invariant_holds(&self, n: usize) -> bool {
        n < 2 || self.runs[n - 2].1 > self.runs[n - 1].1 + self.runs[n].1
    }

    fn merge_collapse<T: Copy>(&mut self, v: &mut [T], lt: &impl Fn(&T, &T) -> bool) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if !self.invariant_holds(n + 1) || !self.invariant_holds(n) {
                if self.runs[n - 1].1 < self.runs[n + 1].1 {
                    n -= 1;
                }
                self.merge_at(v, lt, n);
            } else if self.runs[n].1 <= self.runs[n + 1].1 {
                self.merge_at(v, lt, n);
            } else {
                break;
            }
        }
    }

    fn merge_force_collapse<T: Copy>(&mut self, v: &mut [T], lt: &impl Fn(&T, &T) -> bool) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if n > 0 && self.runs[n - 1].1 < self.runs[n + 1].1 {
                n -= 1;
            }
            self.merge_at(v, lt, n);
        }
    }

    fn merge_at<T: Copy>(&mut self, v: &mut [T], lt: &impl Fn(&T, &T) -> bool, i: usize) {
        let (base_a, len_a) = self.runs[i];
        let (base_b, len_b) = self.runs[i + 1];
        self.runs[i].1 = len_a + len_b;
        self.runs.remove(i + 1);

        let key = v[base_b];
        let k = gallop_right(v, lt, &key, base_a, len_a, 0);
        let base_a = base_a + k;
        let len_a = len_a - k;
        if len_a == 0 {
            return;
        }

        let key = v[base_a + len_a - 1];
        let len_b = gallop_left(v, lt, &key, base_b, len_b, len_b - 1);
        if len_b == 0 {
            return;
        }

        if len_a <= len_b {
            self.merge_low(v, lt, base_a, len_a, base_b, len_b);
        } else {
            self.merge_high(v, lt, base_a, len_a, base_b, len_b);
        }
    }

    /// Merges adjacent runs with run A copied out; used when A is shorter.
    #[allow(clippy::too_many_lines)]
    fn merge_low<T: Copy>(
        &mut self,
        v: &mut [T],
        lt: &impl Fn(&T, &T) -> bool,
        base_a: usize,
        mut len_a: usize,
        base_b: usize,
        mut len_b: usize,
    ) {
        let temp = v[base_a..base_a + len_a].to_vec();
        let mut dest = base_a;
        let mut cursor_a = 0;
        let mut cursor_b = base_b;

        v[dest] = v[cursor_b];
        dest += 1;
        cursor_b += 1;
        len_b -= 1;

        let end = 'merge: {
            if len_b == 0 {
                break 'merge MergeEnd::Done;
            }
            if len_a == 1 {
                break 'merge MergeEnd::LastFromA;
            }

            let mut min_gallop = self.min_gallop;
            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if lt(&v[cursor_b], &temp[cursor_a]) {
                        v[dest] = v[cursor_b];
                        dest += 1;
                        cursor_b += 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 0 {
                            break 'merge MergeEnd::Done;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    } else {
                        v[dest] = temp[cursor_a];
                        dest += 1;
                        cursor_a += 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 1 {
                            break 'merge MergeEnd::LastFromA;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first = true;
                while first || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    let key = v[cursor_b];
                    wins_a = gallop_right(&temp, lt, &key, cursor_a, len_a, 0);
                    if wins_a > 0 {
                        v[dest..dest + wins_a]
                            .copy_from_slice(&temp[cursor_a..cursor_a + wins_a]);
                        dest += wins_a;
                        cursor_a += wins_a;
                        len_a -= wins_a;
                        if len_a == 1 {
                            break 'merge MergeEnd::LastFromA;
                        }
                        // Only reachable with an inconsistent comparator.
                        if len_a == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    v[dest] = v[cursor_b];
                    dest += 1;
                    cursor_b += 1;
                    len_b -= 1;
                    if len_b == 0 {
                        break 'merge MergeEnd::Done;
                    }

                    let key = temp[cursor_a];
                    wins_b = gallop_left(v, lt, &key, cursor_b, len_b, 0);
                    if wins_b > 0 {
                        v.copy_within(cursor_b..cursor_b + wins_b, dest);
                        dest += wins_b;
                        cursor_b += wins_b;
                        len_b -= wins_b;
                        if len_b == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    v[dest] = temp[cursor_a];
                    dest += 1;
                    cursor_a += 1;
                    len_a -= 1;
                    if len_a == 1 {
                        break 'merge MergeEnd::LastFromA;
                    }
                }

                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match end {
            MergeEnd::LastFromA => {
                v.copy_within(cursor_b..cursor_b + len_b, dest);
                v[dest + len_b] = temp[cursor_a];
            }
            MergeEnd::Done | MergeEnd::FirstFromB => {
                v[dest..dest + len_a].copy_from_slice(&temp[cursor_a..cursor_a + len_a]);
            }
        }
    }

    /// Merges adjacent runs from the right with run B copied out; used when
    /// B is shorter. Cursors point one past the next element to move.
    #[allow(clippy::too_many_lines)]
    fn merge_high<T: Copy>(
        &mut self,
        v: &mut [T],
        lt: &impl Fn(&T, &T) -> bool,
        base_a: usize,
        mut len_a: usize,
        base_b: usize,
        mut len_b: usize,
    ) {
        let temp = v[base_b..base_b + len_b].to_vec();
        let mut dest = base_b + len_b;
        let mut cursor_a = base_a + len_a;
        let mut cursor_b = len_b;

        dest -= 1;
        cursor_a -= 1;
        v[dest] = v[cursor_a];
        len_a -= 1;

        let end = 'merge: {
            if len_a == 0 {
                break 'merge MergeEnd::Done;
            }
            if len_b == 1 {
                break 'merge MergeEnd::FirstFromB;
            }

            let mut min_gallop = self.min_gallop;
            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if lt(&temp[cursor_b - 1], &v[cursor_a - 1]) {
                        dest -= 1;
                        cursor_a -= 1;
                        v[dest] = v[cursor_a];
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 0 {
                            break 'merge MergeEnd::Done;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    } else {
                        dest -= 1;
                        cursor_b -= 1;
                        v[dest] = temp[cursor_b];
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 1 {
                            break 'merge MergeEnd::FirstFromB;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first = true;
                while first || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    let key = temp[cursor_b - 1];
                    let k = gallop_right(v, lt, &key, base_a, len_a, len_a - 1);
                    wins_a = len_a - k;
                    if wins_a > 0 {
                        dest -= wins_a;
                        cursor_a -= wins_a;
                        v.copy_within(cursor_a..cursor_a + wins_a, dest);
                        len_a -= wins_a;
                        if len_a == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    dest -= 1;
                    cursor_b -= 1;
                    v[dest] = temp[cursor_b];
                    len_b -= 1;
                    if len_b == 1 {
                        break 'merge MergeEnd::FirstFromB;
                    }

                    let key = v[cursor_a - 1];
                    let k = gallop_left(&temp, lt, &key, 0, len_b, len_b - 1);
                    wins_b = len_b - k;
                    if wins_b > 0 {
                        dest -= wins_b;
                        cursor_b -= wins_b;
                        v[dest..dest + wins_b]
                            .copy_from_slice(&temp[cursor_b..cursor_b + wins_b]);
                        len_b -= wins_b;
                        if len_b == 1 {
                            break 'merge MergeEnd::FirstFromB;
                        }
                        // Only reachable with an inconsistent comparator.
                        if len_b == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    dest -= 1;
                    cursor_a -= 1;
                    v[dest] = v[cursor_a];
                    len_a -= 1;
                    if len_a == 0 {
                        break 'merge MergeEnd::Done;
                    }
                }

                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match end {
            MergeEnd::FirstFromB => {
                dest -= len_a;
                cursor_a -= len_a;
                v.copy_within(cursor_a..cursor_a + len_a, dest);
                v[dest - 1] = temp[cursor_b - 1];
            }
            MergeEnd::Done | MergeEnd::LastFromA => {
                v[dest - len_b..dest].copy_from_slice(&temp[..len_b]);
            }
        }
    }
}
